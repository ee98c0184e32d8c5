//! Latin → Cyrillic transliteration.
//!
//! Users romanize Russian city names freely ("moskva", "tashkent",
//! "sankt-peterburg"); we fold those back into Cyrillic and re-run the
//! exact match. Greedy longest-sequence-first, so "sh" wins over "s"+"h".
//! Characters outside the table (digits, hyphens, Cyrillic input) pass
//! through unchanged, which makes the function a no-op on text that is
//! already in the base script.

/// Multi-character sequences, longest first. Order matters.
const SEQUENCES: &[(&str, &str)] = &[
    ("shch", "щ"),
    ("sch", "щ"),
    ("zh", "ж"),
    ("kh", "х"),
    ("ts", "ц"),
    ("ch", "ч"),
    ("sh", "ш"),
    ("yo", "ё"),
    ("ju", "ю"),
    ("yu", "ю"),
    ("ja", "я"),
    ("ya", "я"),
    ("je", "е"),
    ("ye", "е"),
];

fn single(c: char) -> Option<&'static str> {
    let mapped = match c {
        'a' => "а",
        'b' => "б",
        'c' => "ц",
        'd' => "д",
        'e' => "е",
        'f' => "ф",
        'g' => "г",
        'h' => "х",
        'i' => "и",
        'j' => "й",
        'k' => "к",
        'l' => "л",
        'm' => "м",
        'n' => "н",
        'o' => "о",
        'p' => "п",
        'q' => "к",
        'r' => "р",
        's' => "с",
        't' => "т",
        'u' => "у",
        'v' => "в",
        'w' => "в",
        'x' => "кс",
        'y' => "ы",
        'z' => "з",
        '\'' => "ь",
        _ => return None,
    };
    Some(mapped)
}

/// Transliterate lower-cased text into Cyrillic.
pub fn to_cyrillic(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    'outer: while !rest.is_empty() {
        for (seq, mapped) in SEQUENCES {
            if rest.starts_with(seq) {
                out.push_str(mapped);
                rest = &rest[seq.len()..];
                continue 'outer;
            }
        }
        let c = rest.chars().next().unwrap();
        match single(c) {
            Some(mapped) => out.push_str(mapped),
            None => out.push(c),
        }
        rest = &rest[c.len_utf8()..];
    }

    out
}
