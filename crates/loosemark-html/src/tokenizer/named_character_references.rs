//! Named character reference table and whole-run text decoding.
//!
//! The table is closed: the basic markup escapes, the Latin-1 supplement
//! block (`&iexcl;` through `&yuml;`) and the single numeric reference
//! `&#38;`. Lookups match an entire text run, never a substring of one.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

/// The named character reference table.
/// Maps entity names (without the leading '&') to their replacement strings.
static NAMED_ENTITIES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("lt;", "<"),
        ("gt;", ">"),
        ("amp;", "&"),
        ("#38;", "&"),
        ("quot;", "\""),
        ("apos;", "'"),
        ("nbsp;", " "), // plain ASCII space
        ("iexcl;", "\u{00A1}"), // ¡
        ("cent;", "\u{00A2}"), // ¢
        ("pound;", "\u{00A3}"), // £
        ("curren;", "\u{00A4}"), // ¤
        ("yen;", "\u{00A5}"), // ¥
        ("brvbar;", "\u{00A6}"), // ¦
        ("sect;", "\u{00A7}"), // §
        ("uml;", "\u{00A8}"), // ¨
        ("copy;", "\u{00A9}"), // ©
        ("ordf;", "\u{00AA}"), // ª
        ("laquo;", "\u{00AB}"), // «
        ("not;", "\u{00AC}"), // ¬
        ("shy;", "\u{00AD}"), // (soft hyphen)
        ("reg;", "\u{00AE}"), // ®
        ("macr;", "\u{00AF}"), // ¯
        ("deg;", "\u{00B0}"), // °
        ("plusmn;", "\u{00B1}"), // ±
        ("sup2;", "\u{00B2}"), // ²
        ("sup3;", "\u{00B3}"), // ³
        ("acute;", "\u{00B4}"), // ´
        ("micro;", "\u{00B5}"), // µ
        ("para;", "\u{00B6}"), // ¶
        ("middot;", "\u{00B7}"), // ·
        ("cedil;", "\u{00B8}"), // ¸
        ("sup1;", "\u{00B9}"), // ¹
        ("ordm;", "\u{00BA}"), // º
        ("raquo;", "\u{00BB}"), // »
        ("frac14;", "\u{00BC}"), // ¼
        ("frac12;", "\u{00BD}"), // ½
        ("frac34;", "\u{00BE}"), // ¾
        ("iquest;", "\u{00BF}"), // ¿
        ("Agrave;", "\u{00C0}"), // À
        ("Aacute;", "\u{00C1}"), // Á
        ("Acirc;", "\u{00C2}"), // Â
        ("Atilde;", "\u{00C3}"), // Ã
        ("Auml;", "\u{00C4}"), // Ä
        ("Aring;", "\u{00C5}"), // Å
        ("AElig;", "\u{00C6}"), // Æ
        ("Ccedil;", "\u{00C7}"), // Ç
        ("Egrave;", "\u{00C8}"), // È
        ("Eacute;", "\u{00C9}"), // É
        ("Ecirc;", "\u{00CA}"), // Ê
        ("Euml;", "\u{00CB}"), // Ë
        ("Igrave;", "\u{00CC}"), // Ì
        ("Iacute;", "\u{00CD}"), // Í
        ("Icirc;", "\u{00CE}"), // Î
        ("Iuml;", "\u{00CF}"), // Ï
        ("ETH;", "\u{00D0}"), // Ð
        ("Ntilde;", "\u{00D1}"), // Ñ
        ("Ograve;", "\u{00D2}"), // Ò
        ("Oacute;", "\u{00D3}"), // Ó
        ("Ocirc;", "\u{00D4}"), // Ô
        ("Otilde;", "\u{00D5}"), // Õ
        ("Ouml;", "\u{00D6}"), // Ö
        ("times;", "\u{00D7}"), // ×
        ("Oslash;", "\u{00D8}"), // Ø
        ("Ugrave;", "\u{00D9}"), // Ù
        ("Uacute;", "\u{00DA}"), // Ú
        ("Ucirc;", "\u{00DB}"), // Û
        ("Uuml;", "\u{00DC}"), // Ü
        ("Yacute;", "\u{00DD}"), // Ý
        ("THORN;", "\u{00DE}"), // Þ
        ("szlig;", "\u{00DF}"), // ß
        ("agrave;", "\u{00E0}"), // à
        ("aacute;", "\u{00E1}"), // á
        ("acirc;", "\u{00E2}"), // â
        ("atilde;", "\u{00E3}"), // ã
        ("auml;", "\u{00E4}"), // ä
        ("aring;", "\u{00E5}"), // å
        ("aelig;", "\u{00E6}"), // æ
        ("ccedil;", "\u{00E7}"), // ç
        ("egrave;", "\u{00E8}"), // è
        ("eacute;", "\u{00E9}"), // é
        ("ecirc;", "\u{00EA}"), // ê
        ("euml;", "\u{00EB}"), // ë
        ("igrave;", "\u{00EC}"), // ì
        ("iacute;", "\u{00ED}"), // í
        ("icirc;", "\u{00EE}"), // î
        ("iuml;", "\u{00EF}"), // ï
        ("eth;", "\u{00F0}"), // ð
        ("ntilde;", "\u{00F1}"), // ñ
        ("ograve;", "\u{00F2}"), // ò
        ("oacute;", "\u{00F3}"), // ó
        ("ocirc;", "\u{00F4}"), // ô
        ("otilde;", "\u{00F5}"), // õ
        ("ouml;", "\u{00F6}"), // ö
        ("divide;", "\u{00F7}"), // ÷
        ("oslash;", "\u{00F8}"), // ø
        ("ugrave;", "\u{00F9}"), // ù
        ("uacute;", "\u{00FA}"), // ú
        ("ucirc;", "\u{00FB}"), // û
        ("uuml;", "\u{00FC}"), // ü
        ("yacute;", "\u{00FD}"), // ý
        ("thorn;", "\u{00FE}"), // þ
        ("yuml;", "\u{00FF}"), // ÿ
    ])
});

/// Look up a character reference by name.
///
/// The `name` should NOT include the leading '&' but must include the
/// trailing ';'.
///
/// # Example
/// ```ignore
/// use loosemark_html::tokenizer::lookup_entity;
///
/// assert_eq!(lookup_entity("amp;"), Some("&"));
/// assert_eq!(lookup_entity("#38;"), Some("&"));
/// assert_eq!(lookup_entity("amp"), None);
/// ```
#[must_use]
pub fn lookup_entity(name: &str) -> Option<&'static str> {
    NAMED_ENTITIES.get(name).copied()
}

/// Decode a text run that is exactly one character reference.
///
/// Anything else, including text that merely contains a reference, is
/// returned unchanged.
///
/// # Example
/// ```ignore
/// use loosemark_html::tokenizer::decode;
///
/// assert_eq!(decode("&lt;"), "<");
/// assert_eq!(decode("a &lt; b"), "a &lt; b");
/// assert_eq!(decode("&zzz;"), "&zzz;");
/// ```
#[must_use]
pub fn decode(raw: &str) -> Cow<'_, str> {
    raw.strip_prefix('&')
        .and_then(lookup_entity)
        .map_or(Cow::Borrowed(raw), Cow::Borrowed)
}
