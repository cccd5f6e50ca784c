//! Greedy word wrapping
//!
//! Explicit newlines are hard breaks. Within a paragraph, words are packed
//! onto a line while the measured width stays within `max_width`; a word that
//! cannot fit on a line of its own is split between characters. Runs of
//! whitespace collapse to a single space, and an empty paragraph yields one
//! empty line so blank lines in the source keep their vertical space.

/// Wrap `text` into lines no wider than `max_width` according to `measure`
pub fn wrap_text<F>(text: &str, max_width: f64, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f64,
{
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        wrap_paragraph(paragraph, max_width, &measure, &mut lines);
    }
    lines
}

fn wrap_paragraph<F>(paragraph: &str, max_width: f64, measure: &F, out: &mut Vec<String>)
where
    F: Fn(&str) -> f64,
{
    let mut current = String::new();

    for word in paragraph.split_whitespace() {
        if current.is_empty() {
            if measure(word) <= max_width {
                current.push_str(word);
            } else {
                current = split_word(word, max_width, measure, out);
            }
            continue;
        }

        let candidate = format!("{current} {word}");
        if measure(&candidate) <= max_width {
            current = candidate;
            continue;
        }

        out.push(std::mem::take(&mut current));
        if measure(word) <= max_width {
            current.push_str(word);
        } else {
            current = split_word(word, max_width, measure, out);
        }
    }

    out.push(current);
}

/// Break an overlong word into full-width pieces. All but the last piece are
/// pushed to `out`; the last is returned so following words can join it.
fn split_word<F>(word: &str, max_width: f64, measure: &F, out: &mut Vec<String>) -> String
where
    F: Fn(&str) -> f64,
{
    let mut piece = String::new();
    for ch in word.chars() {
        piece.push(ch);
        // A piece always keeps at least one character, even when that
        // character alone is wider than the line.
        if piece.chars().count() > 1 && measure(&piece) > max_width {
            piece.pop();
            out.push(std::mem::take(&mut piece));
            piece.push(ch);
        }
    }
    piece
}
