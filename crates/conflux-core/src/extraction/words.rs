use crate::extraction::{Word, WordOptions};

/// Merge backend words that sit closer together than the given tolerances.
///
/// Words are first bucketed into rows (tops within `y_tolerance` of the
/// row's first word), then joined left to right whenever the horizontal
/// gap to the previous word is at most `x_tolerance`. Blank characters are
/// kept, so "Tech" followed closely by "2" becomes the single token "Tech 2".
pub fn merge_words(words: &[Word], opts: &WordOptions) -> Vec<Word> {
    let mut sorted: Vec<&Word> = words.iter().collect();
    sorted.sort_by(|a, b| a.top.total_cmp(&b.top).then(a.x0.total_cmp(&b.x0)));

    let mut rows: Vec<Vec<&Word>> = Vec::new();
    let mut anchor: Option<f32> = None;
    for word in sorted {
        match anchor {
            Some(top) if (word.top - top).abs() <= opts.y_tolerance => {
                if let Some(row) = rows.last_mut() {
                    row.push(word);
                }
            }
            _ => {
                anchor = Some(word.top);
                rows.push(vec![word]);
            }
        }
    }

    let mut merged = Vec::with_capacity(words.len());
    for mut row in rows {
        row.sort_by(|a, b| a.x0.total_cmp(&b.x0));

        let mut current: Option<Word> = None;
        for word in row {
            current = Some(match current.take() {
                Some(mut acc) if word.x0 - acc.x1 <= opts.x_tolerance => {
                    acc.text.push(' ');
                    acc.text.push_str(&word.text);
                    acc.x1 = acc.x1.max(word.x1);
                    acc.top = acc.top.min(word.top);
                    acc.bottom = acc.bottom.max(word.bottom);
                    acc.size = max_size(acc.size, word.size);
                    acc
                }
                Some(acc) => {
                    merged.push(acc);
                    word.clone()
                }
                None => word.clone(),
            });
        }
        merged.extend(current);
    }

    merged
}

fn max_size(a: Option<f32>, b: Option<f32>) -> Option<f32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, x0: f32, x1: f32, top: f32) -> Word {
        Word {
            text: text.to_string(),
            x0,
            x1,
            top,
            bottom: top + 10.0,
            size: Some(10.0),
        }
    }

    fn tolerance(x: f32) -> WordOptions {
        WordOptions {
            x_tolerance: x,
            y_tolerance: 3.0,
        }
    }

    #[test]
    fn test_close_words_merge_with_space() {
        let words = vec![
            word("2", 274.0, 280.0, 100.0),
            word("Tech", 250.0, 271.0, 100.5),
        ];
        let merged = merge_words(&words, &tolerance(5.0));
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text, "Tech 2");
        assert_eq!(merged[0].x0, 250.0);
        assert_eq!(merged[0].x1, 280.0);
        assert_eq!(merged[0].top, 100.0);
    }

    #[test]
    fn test_wide_gap_keeps_words_apart() {
        let words = vec![
            word("Tech", 250.0, 271.0, 100.0),
            word("2", 280.0, 286.0, 100.0),
        ];
        let merged = merge_words(&words, &tolerance(5.0));
        assert_eq!(merged.len(), 2);

        let tight = merge_words(&words, &tolerance(10.0));
        assert_eq!(tight.len(), 1);
    }

    #[test]
    fn test_different_rows_never_merge() {
        let words = vec![
            word("Lib", 150.0, 165.0, 100.0),
            word("3", 166.0, 170.0, 120.0),
        ];
        let merged = merge_words(&words, &WordOptions::default());
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(merge_words(&[], &WordOptions::default()).is_empty());
    }
}
