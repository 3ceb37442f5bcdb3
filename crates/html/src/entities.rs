//! Entity tables
//!
//! The five XML built-in entities, the HTML named-entity table used to
//! rewrite everything else into numeric character references, and numeric
//! reference decoding.

use rustc_hash::FxHashMap;
use std::sync::LazyLock;

/// The only entities XML predefines
pub const XML_ENTITIES: [&str; 5] = ["amp", "lt", "gt", "quot", "apos"];

/// Map of HTML entity names to their code points
static ENTITY_CODES: LazyLock<FxHashMap<&'static str, u32>> = LazyLock::new(|| {
    let mut m = FxHashMap::default();

    // === ISO 8859-1 (Latin-1) ===
    m.insert("nbsp", 0x00A0);          // no-break space
    m.insert("iexcl", 0x00A1);         // inverted exclamation mark
    m.insert("cent", 0x00A2);          // cent sign
    m.insert("pound", 0x00A3);         // pound sign
    m.insert("curren", 0x00A4);        // currency sign
    m.insert("yen", 0x00A5);           // yen sign
    m.insert("brvbar", 0x00A6);        // broken bar
    m.insert("sect", 0x00A7);          // section sign
    m.insert("uml", 0x00A8);           // diaeresis
    m.insert("copy", 0x00A9);          // copyright sign
    m.insert("ordf", 0x00AA);          // feminine ordinal indicator
    m.insert("laquo", 0x00AB);         // left-pointing double angle quotation mark
    m.insert("not", 0x00AC);           // not sign
    m.insert("shy", 0x00AD);           // soft hyphen
    m.insert("reg", 0x00AE);           // registered sign
    m.insert("macr", 0x00AF);          // macron
    m.insert("deg", 0x00B0);           // degree sign
    m.insert("plusmn", 0x00B1);        // plus-minus sign
    m.insert("sup2", 0x00B2);          // superscript two
    m.insert("sup3", 0x00B3);          // superscript three
    m.insert("acute", 0x00B4);         // acute accent
    m.insert("micro", 0x00B5);         // micro sign
    m.insert("para", 0x00B6);          // pilcrow sign
    m.insert("middot", 0x00B7);        // middle dot
    m.insert("cedil", 0x00B8);         // cedilla
    m.insert("sup1", 0x00B9);          // superscript one
    m.insert("ordm", 0x00BA);          // masculine ordinal indicator
    m.insert("raquo", 0x00BB);         // right-pointing double angle quotation mark
    m.insert("frac14", 0x00BC);        // vulgar fraction one quarter
    m.insert("frac12", 0x00BD);        // vulgar fraction one half
    m.insert("frac34", 0x00BE);        // vulgar fraction three quarters
    m.insert("iquest", 0x00BF);        // inverted question mark
    m.insert("Agrave", 0x00C0);        // Latin capital letter A with grave
    m.insert("Aacute", 0x00C1);        // Latin capital letter A with acute
    m.insert("Acirc", 0x00C2);         // Latin capital letter A with circumflex
    m.insert("Atilde", 0x00C3);        // Latin capital letter A with tilde
    m.insert("Auml", 0x00C4);          // Latin capital letter A with diaeresis
    m.insert("Aring", 0x00C5);         // Latin capital letter A with ring above
    m.insert("AElig", 0x00C6);         // Latin capital letter AE
    m.insert("Ccedil", 0x00C7);        // Latin capital letter C with cedilla
    m.insert("Egrave", 0x00C8);        // Latin capital letter E with grave
    m.insert("Eacute", 0x00C9);        // Latin capital letter E with acute
    m.insert("Ecirc", 0x00CA);         // Latin capital letter E with circumflex
    m.insert("Euml", 0x00CB);          // Latin capital letter E with diaeresis
    m.insert("Igrave", 0x00CC);        // Latin capital letter I with grave
    m.insert("Iacute", 0x00CD);        // Latin capital letter I with acute
    m.insert("Icirc", 0x00CE);         // Latin capital letter I with circumflex
    m.insert("Iuml", 0x00CF);          // Latin capital letter I with diaeresis
    m.insert("ETH", 0x00D0);           // Latin capital letter ETH
    m.insert("Ntilde", 0x00D1);        // Latin capital letter N with tilde
    m.insert("Ograve", 0x00D2);        // Latin capital letter O with grave
    m.insert("Oacute", 0x00D3);        // Latin capital letter O with acute
    m.insert("Ocirc", 0x00D4);         // Latin capital letter O with circumflex
    m.insert("Otilde", 0x00D5);        // Latin capital letter O with tilde
    m.insert("Ouml", 0x00D6);          // Latin capital letter O with diaeresis
    m.insert("times", 0x00D7);         // multiplication sign
    m.insert("Oslash", 0x00D8);        // Latin capital letter O with stroke
    m.insert("Ugrave", 0x00D9);        // Latin capital letter U with grave
    m.insert("Uacute", 0x00DA);        // Latin capital letter U with acute
    m.insert("Ucirc", 0x00DB);         // Latin capital letter U with circumflex
    m.insert("Uuml", 0x00DC);          // Latin capital letter U with diaeresis
    m.insert("Yacute", 0x00DD);        // Latin capital letter Y with acute
    m.insert("THORN", 0x00DE);         // Latin capital letter THORN
    m.insert("szlig", 0x00DF);         // Latin small letter sharp s
    m.insert("agrave", 0x00E0);        // Latin small letter a with grave
    m.insert("aacute", 0x00E1);        // Latin small letter a with acute
    m.insert("acirc", 0x00E2);         // Latin small letter a with circumflex
    m.insert("atilde", 0x00E3);        // Latin small letter a with tilde
    m.insert("auml", 0x00E4);          // Latin small letter a with diaeresis
    m.insert("aring", 0x00E5);         // Latin small letter a with ring above
    m.insert("aelig", 0x00E6);         // Latin small letter ae
    m.insert("ccedil", 0x00E7);        // Latin small letter c with cedilla
    m.insert("egrave", 0x00E8);        // Latin small letter e with grave
    m.insert("eacute", 0x00E9);        // Latin small letter e with acute
    m.insert("ecirc", 0x00EA);         // Latin small letter e with circumflex
    m.insert("euml", 0x00EB);          // Latin small letter e with diaeresis
    m.insert("igrave", 0x00EC);        // Latin small letter i with grave
    m.insert("iacute", 0x00ED);        // Latin small letter i with acute
    m.insert("icirc", 0x00EE);         // Latin small letter i with circumflex
    m.insert("iuml", 0x00EF);          // Latin small letter i with diaeresis
    m.insert("eth", 0x00F0);           // Latin small letter eth
    m.insert("ntilde", 0x00F1);        // Latin small letter n with tilde
    m.insert("ograve", 0x00F2);        // Latin small letter o with grave
    m.insert("oacute", 0x00F3);        // Latin small letter o with acute
    m.insert("ocirc", 0x00F4);         // Latin small letter o with circumflex
    m.insert("otilde", 0x00F5);        // Latin small letter o with tilde
    m.insert("ouml", 0x00F6);          // Latin small letter o with diaeresis
    m.insert("divide", 0x00F7);        // division sign
    m.insert("oslash", 0x00F8);        // Latin small letter o with stroke
    m.insert("ugrave", 0x00F9);        // Latin small letter u with grave
    m.insert("uacute", 0x00FA);        // Latin small letter u with acute
    m.insert("ucirc", 0x00FB);         // Latin small letter u with circumflex
    m.insert("uuml", 0x00FC);          // Latin small letter u with diaeresis
    m.insert("yacute", 0x00FD);        // Latin small letter y with acute
    m.insert("thorn", 0x00FE);         // Latin small letter thorn
    m.insert("yuml", 0x00FF);          // Latin small letter y with diaeresis

    // === Symbols and Greek letters ===
    m.insert("fnof", 0x0192);          // Latin small f with hook
    m.insert("Alpha", 0x0391);         // Greek capital letter alpha
    m.insert("Beta", 0x0392);          // Greek capital letter beta
    m.insert("Gamma", 0x0393);         // Greek capital letter gamma
    m.insert("Delta", 0x0394);         // Greek capital letter delta
    m.insert("Epsilon", 0x0395);       // Greek capital letter epsilon
    m.insert("Zeta", 0x0396);          // Greek capital letter zeta
    m.insert("Eta", 0x0397);           // Greek capital letter eta
    m.insert("Theta", 0x0398);         // Greek capital letter theta
    m.insert("Iota", 0x0399);          // Greek capital letter iota
    m.insert("Kappa", 0x039A);         // Greek capital letter kappa
    m.insert("Lambda", 0x039B);        // Greek capital letter lambda
    m.insert("Mu", 0x039C);            // Greek capital letter mu
    m.insert("Nu", 0x039D);            // Greek capital letter nu
    m.insert("Xi", 0x039E);            // Greek capital letter xi
    m.insert("Omicron", 0x039F);       // Greek capital letter omicron
    m.insert("Pi", 0x03A0);            // Greek capital letter pi
    m.insert("Rho", 0x03A1);           // Greek capital letter rho
    m.insert("Sigma", 0x03A3);         // Greek capital letter sigma
    m.insert("Tau", 0x03A4);           // Greek capital letter tau
    m.insert("Upsilon", 0x03A5);       // Greek capital letter upsilon
    m.insert("Phi", 0x03A6);           // Greek capital letter phi
    m.insert("Chi", 0x03A7);           // Greek capital letter chi
    m.insert("Psi", 0x03A8);           // Greek capital letter psi
    m.insert("Omega", 0x03A9);         // Greek capital letter omega
    m.insert("alpha", 0x03B1);         // Greek small letter alpha
    m.insert("beta", 0x03B2);          // Greek small letter beta
    m.insert("gamma", 0x03B3);         // Greek small letter gamma
    m.insert("delta", 0x03B4);         // Greek small letter delta
    m.insert("epsilon", 0x03B5);       // Greek small letter epsilon
    m.insert("zeta", 0x03B6);          // Greek small letter zeta
    m.insert("eta", 0x03B7);           // Greek small letter eta
    m.insert("theta", 0x03B8);         // Greek small letter theta
    m.insert("iota", 0x03B9);          // Greek small letter iota
    m.insert("kappa", 0x03BA);         // Greek small letter kappa
    m.insert("lambda", 0x03BB);        // Greek small letter lambda
    m.insert("mu", 0x03BC);            // Greek small letter mu
    m.insert("nu", 0x03BD);            // Greek small letter nu
    m.insert("xi", 0x03BE);            // Greek small letter xi
    m.insert("omicron", 0x03BF);       // Greek small letter omicron
    m.insert("pi", 0x03C0);            // Greek small letter pi
    m.insert("rho", 0x03C1);           // Greek small letter rho
    m.insert("sigmaf", 0x03C2);        // Greek small letter final sigma
    m.insert("sigma", 0x03C3);         // Greek small letter sigma
    m.insert("tau", 0x03C4);           // Greek small letter tau
    m.insert("upsilon", 0x03C5);       // Greek small letter upsilon
    m.insert("phi", 0x03C6);           // Greek small letter phi
    m.insert("chi", 0x03C7);           // Greek small letter chi
    m.insert("psi", 0x03C8);           // Greek small letter psi
    m.insert("omega", 0x03C9);         // Greek small letter omega
    m.insert("thetasym", 0x03D1);      // Greek small letter theta symbol
    m.insert("upsih", 0x03D2);         // Greek upsilon with hook symbol
    m.insert("piv", 0x03D6);           // Greek pi symbol
    m.insert("bull", 0x2022);          // bullet
    m.insert("hellip", 0x2026);        // horizontal ellipsis
    m.insert("prime", 0x2032);         // prime
    m.insert("Prime", 0x2033);         // double prime
    m.insert("oline", 0x203E);         // overline
    m.insert("weierp", 0x2118);        // script capital P
    m.insert("image", 0x2111);         // blackletter capital I
    m.insert("real", 0x211C);          // blackletter capital R
    m.insert("trade", 0x2122);         // trade mark sign
    m.insert("alefsym", 0x2135);       // alef symbol
    m.insert("larr", 0x2190);          // leftwards arrow
    m.insert("uarr", 0x2191);          // upwards arrow
    m.insert("rarr", 0x2192);          // rightwards arrow
    m.insert("darr", 0x2193);          // downwards arrow
    m.insert("harr", 0x2194);          // left right arrow
    m.insert("crarr", 0x21B5);         // downwards arrow with corner leftwards
    m.insert("lArr", 0x21D0);          // leftwards double arrow
    m.insert("uArr", 0x21D1);          // upwards double arrow
    m.insert("rArr", 0x21D2);          // rightwards double arrow
    m.insert("dArr", 0x21D3);          // downwards double arrow
    m.insert("hArr", 0x21D4);          // left right double arrow
    m.insert("forall", 0x2200);        // for all
    m.insert("part", 0x2202);          // partial differential
    m.insert("exist", 0x2203);         // there exists
    m.insert("empty", 0x2205);         // empty set
    m.insert("nabla", 0x2207);         // nabla
    m.insert("isin", 0x2208);          // element of
    m.insert("notin", 0x2209);         // not an element of
    m.insert("ni", 0x220B);            // Contains as member
    m.insert("prod", 0x220F);          // n-ary product
    m.insert("sum", 0x2211);           // n-ary sumation
    m.insert("minus", 0x2212);         // minus sign
    m.insert("lowast", 0x2217);        // asterisk operator
    m.insert("radic", 0x221A);         // square root
    m.insert("prop", 0x221D);          // proportional to
    m.insert("infin", 0x221E);         // infinity
    m.insert("ang", 0x2220);           // angle
    m.insert("and", 0x2227);           // logical and
    m.insert("or", 0x2228);            // logical or
    m.insert("cap", 0x2229);           // intersection
    m.insert("cup", 0x222A);           // union
    m.insert("int", 0x222B);           // integral
    m.insert("there4", 0x2234);        // therefore
    m.insert("sim", 0x223C);           // tilde operator
    m.insert("cong", 0x2245);          // approximately equal to
    m.insert("asymp", 0x2248);         // almost equal to
    m.insert("ne", 0x2260);            // not equal to
    m.insert("equiv", 0x2261);         // identical to
    m.insert("le", 0x2264);            // less-than or equal to
    m.insert("ge", 0x2265);            // greater-than or equal to
    m.insert("sub", 0x2282);           // subset of
    m.insert("sup", 0x2283);           // superset of
    m.insert("nsub", 0x2284);          // not a subset of
    m.insert("sube", 0x2286);          // subset of or equal to
    m.insert("supe", 0x2287);          // superset of or equal to
    m.insert("oplus", 0x2295);         // circled plus
    m.insert("otimes", 0x2297);        // circled times
    m.insert("perp", 0x22A5);          // up tack
    m.insert("sdot", 0x22C5);          // dot operator
    m.insert("lceil", 0x2308);         // left ceiling
    m.insert("rceil", 0x2309);         // right ceiling
    m.insert("lfloor", 0x230A);        // left floor
    m.insert("rfloor", 0x230B);        // right floor
    m.insert("lang", 0x2329);          // left-pointing angle bracket
    m.insert("rang", 0x232A);          // right-pointing angle bracket
    m.insert("loz", 0x25CA);           // lozenge
    m.insert("spades", 0x2660);        // black spade suit
    m.insert("clubs", 0x2663);         // black club suit
    m.insert("hearts", 0x2665);        // black heart suit
    m.insert("diams", 0x2666);         // black diamond suit

    // === Special characters ===
    m.insert("quot", 0x0022);          // quotation mark
    m.insert("amp", 0x0026);           // ampersand
    m.insert("lt", 0x003C);            // less-than sign
    m.insert("gt", 0x003E);            // greater-than sign
    m.insert("OElig", 0x0152);         // Latin capital ligature OE
    m.insert("oelig", 0x0153);         // Latin small ligature oe
    m.insert("Scaron", 0x0160);        // Latin capital letter S with caron
    m.insert("scaron", 0x0161);        // Latin small letter s with caron
    m.insert("Yuml", 0x0178);          // Latin capital letter Y with diaeresis
    m.insert("circ", 0x02C6);          // modifier letter circumflex accent
    m.insert("tilde", 0x02DC);         // small tilde
    m.insert("ensp", 0x2002);          // en space
    m.insert("emsp", 0x2003);          // em space
    m.insert("thinsp", 0x2009);        // thin space
    m.insert("zwnj", 0x200C);          // zero width non-joiner
    m.insert("zwj", 0x200D);           // zero width joiner
    m.insert("lrm", 0x200E);           // left-to-right mark
    m.insert("rlm", 0x200F);           // right-to-left mark
    m.insert("ndash", 0x2013);         // en dash
    m.insert("mdash", 0x2014);         // em dash
    m.insert("lsquo", 0x2018);         // left single quotation mark
    m.insert("rsquo", 0x2019);         // right single quotation mark
    m.insert("sbquo", 0x201A);         // single low-9 quotation mark
    m.insert("ldquo", 0x201C);         // left double quotation mark
    m.insert("rdquo", 0x201D);         // right double quotation mark
    m.insert("bdquo", 0x201E);         // double low-9 quotation mark
    m.insert("dagger", 0x2020);        // dagger
    m.insert("Dagger", 0x2021);        // double dagger
    m.insert("permil", 0x2030);        // per mille sign
    m.insert("lsaquo", 0x2039);        // single left-pointing angle quotation mark
    m.insert("rsaquo", 0x203A);        // single right-pointing angle quotation mark
    m.insert("euro", 0x20AC);          // euro sign

    m
});

/// True for the five entities XML understands without a DTD
pub fn is_xml_entity(name: &str) -> bool {
    XML_ENTITIES.contains(&name)
}

/// Look up the code point of a named HTML entity (without the & and ;)
pub fn entity_code_point(name: &str) -> Option<u32> {
    ENTITY_CODES.get(name).copied()
}

/// True when the name would survive XML emission, either as a built-in or
/// through the code point table
pub fn is_known_entity(name: &str) -> bool {
    is_xml_entity(name) || ENTITY_CODES.contains_key(name)
}

/// Decode a numeric character reference body (`65` or `x41`)
pub fn decode_numeric(s: &str) -> Option<char> {
    let (digits, radix) = match s.strip_prefix('x').or_else(|| s.strip_prefix('X')) {
        Some(hex) => (hex, 16),
        None => (s, 10),
    };
    if digits.is_empty() {
        return None;
    }

    // An overflowing body still names a character, just not a valid one.
    let value = u32::from_str_radix(digits, radix).unwrap_or(u32::MAX);
    Some(code_point_to_char(value))
}

/// Map a referenced code point onto a character that is legal in XML output
pub(crate) fn code_point_to_char(value: u32) -> char {
    let value = match value {
        0x00 => 0xFFFD, // NULL -> REPLACEMENT CHARACTER
        // C0 controls other than tab, LF and CR are not XML characters
        0x01..=0x08 | 0x0B | 0x0C | 0x0E..=0x1F => 0xFFFD,
        // Surrogate range is invalid
        0xD800..=0xDFFF => 0xFFFD,
        // Values above max Unicode are invalid
        v if v > 0x10FFFF => 0xFFFD,
        v => v,
    };

    char::from_u32(value).unwrap_or('\u{FFFD}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xml_entities() {
        for name in ["amp", "lt", "gt", "quot", "apos"] {
            assert!(is_xml_entity(name));
        }
        assert!(!is_xml_entity("nbsp"));
        assert!(!is_xml_entity("AMP"));
    }

    #[test]
    fn test_latin1_entities() {
        assert_eq!(entity_code_point("nbsp"), Some(160));
        assert_eq!(entity_code_point("copy"), Some(169));
        assert_eq!(entity_code_point("times"), Some(215));
        assert_eq!(entity_code_point("yuml"), Some(255));
    }

    #[test]
    fn test_greek_and_symbols() {
        assert_eq!(entity_code_point("alpha"), Some(945));
        assert_eq!(entity_code_point("Omega"), Some(937));
        assert_eq!(entity_code_point("rArr"), Some(8658));
        assert_eq!(entity_code_point("diams"), Some(9830));
    }

    #[test]
    fn test_special_characters() {
        assert_eq!(entity_code_point("mdash"), Some(8212));
        assert_eq!(entity_code_point("euro"), Some(8364));
        assert_eq!(entity_code_point("OElig"), Some(338));
    }

    #[test]
    fn test_entity_names_are_case_sensitive() {
        assert_eq!(entity_code_point("Alpha"), Some(913));
        assert_eq!(entity_code_point("alpha"), Some(945));
        assert_eq!(entity_code_point("ALPHA"), None);
    }

    #[test]
    fn test_known_entities() {
        assert!(is_known_entity("apos"));
        assert!(is_known_entity("hellip"));
        assert!(!is_known_entity("bogus"));
    }

    #[test]
    fn test_decode_numeric() {
        assert_eq!(decode_numeric("65"), Some('A'));
        assert_eq!(decode_numeric("x41"), Some('A'));
        assert_eq!(decode_numeric("X20AC"), Some('€'));
        assert_eq!(decode_numeric("169"), Some('©'));
    }

    #[test]
    fn test_decode_numeric_empty() {
        assert_eq!(decode_numeric(""), None);
        assert_eq!(decode_numeric("x"), None);
    }

    #[test]
    fn test_decode_numeric_replacements() {
        assert_eq!(decode_numeric("0"), Some('\u{FFFD}'));
        assert_eq!(decode_numeric("145"), Some('\u{91}'));
        assert_eq!(decode_numeric("1"), Some('\u{FFFD}'));
        assert_eq!(decode_numeric("9"), Some('\t'));
        assert_eq!(decode_numeric("55296"), Some('\u{FFFD}'));
        assert_eq!(decode_numeric("1114112"), Some('\u{FFFD}'));
        assert_eq!(decode_numeric("99999999999999999999"), Some('\u{FFFD}'));
    }
}
