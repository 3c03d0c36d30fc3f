use std::cmp::Ordering;

// Valid components of version numbers are numbers, period or string
// fragments ("beta" etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Number,
    Period,
    Other,
}

fn classify_char(c: char) -> CharClass {
    if c == '.' {
        CharClass::Period
    } else if c.is_ascii_digit() {
        CharClass::Number
    } else {
        CharClass::Other
    }
}

fn token_class(token: &str) -> CharClass {
    token.chars().next().map_or(CharClass::Other, classify_char)
}

// Split a version string into individual components. A component is a
// continuous run of characters with the same classification; for example,
// "1.20rc3" splits into ["1", ".", "20", "rc", "3"]. A period always
// delimits components, so ".." yields two one-character tokens.
fn split_version(version: &str) -> Vec<String> {
    let mut parts = Vec::new();

    let mut chars = version.chars();
    let Some(first) = chars.next() else {
        return parts;
    };

    let mut segment = String::from(first);
    let mut prev_class = classify_char(first);

    for c in chars {
        let class = classify_char(c);
        if class != prev_class || prev_class == CharClass::Period {
            parts.push(segment);
            segment = String::new();
        }
        segment.push(c);
        prev_class = class;
    }
    parts.push(segment);

    parts
}

// Tolerant base-10 parse: leading digits only, saturating on overflow.
fn lenient_number(token: &str) -> u64 {
    let mut value: u64 = 0;
    for digit in token.bytes().take_while(u8::is_ascii_digit) {
        value = value
            .saturating_mul(10)
            .saturating_add(u64::from(digit - b'0'));
    }
    value
}

/// Compares two free-form version strings, ordering `a` relative to `b`.
///
/// Numeric components compare as integers, string fragments compare
/// lexicographically, and a trailing pre-release tag sorts below the bare
/// version while a trailing numeric component sorts above it:
/// `1.2.0 > 1.2rc1`, `1.5 > 1.5b3`, `1.5.1 > 1.5`.
///
/// Never fails; odd input degrades gracefully. Pure and reentrant.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let parts_a = split_version(a);
    let parts_b = split_version(b);

    // Compare the common length of both version strings.
    for (part_a, part_b) in parts_a.iter().zip(parts_b.iter()) {
        let class_a = token_class(part_a);
        let class_b = token_class(part_b);

        if class_a == class_b {
            match class_a {
                CharClass::Other => {
                    let ordering = part_a.as_str().cmp(part_b.as_str());
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
                CharClass::Number => {
                    let ordering = lenient_number(part_a).cmp(&lenient_number(part_b));
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
                CharClass::Period => {}
            }
        } else {
            return match (class_a, class_b) {
                // 1.2rc1 < 1.2.0
                (CharClass::Other, _) => Ordering::Less,
                // 1.2.0 > 1.2rc1
                (_, CharClass::Other) => Ordering::Greater,
                // One is a number and the other is a period; the period is
                // invalid and ranks lower.
                (CharClass::Number, _) => Ordering::Greater,
                _ => Ordering::Less,
            };
        }
    }

    // Equal up to the point where both still have components; the class of
    // the first extra component decides.
    match parts_a.len().cmp(&parts_b.len()) {
        Ordering::Equal => Ordering::Equal,
        Ordering::Greater => match token_class(&parts_a[parts_b.len()]) {
            // 1.5b3 < 1.5
            CharClass::Other => Ordering::Less,
            // 1.5.1 > 1.5
            _ => Ordering::Greater,
        },
        Ordering::Less => match token_class(&parts_b[parts_a.len()]) {
            CharClass::Other => Ordering::Greater,
            _ => Ordering::Less,
        },
    }
}
