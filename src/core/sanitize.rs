// src/core/sanitize.rs

/// Named entities that show up in BoardGameGeek descriptions, plus the XML
/// five. Anything not listed is left as written.
#[rustfmt::skip]
const NAMED: &[(&str, &str)] = &[
    ("amp", "&"), ("lt", "<"), ("gt", ">"), ("quot", "\""), ("apos", "'"),
    ("nbsp", "\u{a0}"), ("ndash", "–"), ("mdash", "—"), ("hellip", "…"),
    ("lsquo", "‘"), ("rsquo", "’"), ("ldquo", "“"), ("rdquo", "”"),
    ("laquo", "«"), ("raquo", "»"), ("bull", "•"), ("middot", "·"),
    ("times", "×"), ("divide", "÷"), ("deg", "°"), ("plusmn", "±"),
    ("frac12", "½"), ("frac14", "¼"), ("frac34", "¾"),
    ("copy", "©"), ("reg", "®"), ("trade", "™"), ("euro", "€"), ("pound", "£"),
    ("eacute", "é"), ("egrave", "è"), ("ecirc", "ê"), ("aacute", "á"), ("agrave", "à"),
    ("acirc", "â"), ("auml", "ä"), ("ouml", "ö"), ("uuml", "ü"), ("Auml", "Ä"),
    ("Ouml", "Ö"), ("Uuml", "Ü"), ("szlig", "ß"), ("ccedil", "ç"), ("ntilde", "ñ"),
    ("iacute", "í"), ("oacute", "ó"), ("uacute", "ú"), ("Eacute", "É"), ("oslash", "ø"),
    ("aring", "å"), ("aelig", "æ"),
];

// Longest entity name we bother looking for a ';' within.
const MAX_ENTITY_LEN: usize = 10;

/// Decode HTML character references (`&#10;`, `&#x2014;`, `&mdash;`).
/// Unknown or malformed references are copied through untouched, so a bare
/// `&` in running text survives.
pub fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];

        let decoded = tail
            .char_indices()
            .take(MAX_ENTITY_LEN + 1)
            .find(|&(_, c)| c == ';')
            .and_then(|(semi, _)| resolve(&tail[..semi]).map(|ch| (ch, semi)));

        match decoded {
            Some((text, semi)) => {
                out.push_str(&text);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

fn resolve(name: &str) -> Option<String> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }
    NAMED
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, v)| v.to_string())
}

/// Collapse runs of whitespace into single spaces and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}
