use crate::extraction::Word;

/// Maximum vertical offset between words of one visual line.
pub const LINE_TOLERANCE: f32 = 5.0;

/// Words sharing a vertical band, ordered left to right.
pub type Line = Vec<Word>;

/// Group a page's words into visual lines.
///
/// Words are sorted by (top, x0). A word opens a new line when its top is
/// more than `tolerance` away from the top of the word that opened the
/// current line; the anchor does not drift as words are appended.
pub fn group_into_lines(words: &[Word], tolerance: f32) -> Vec<Line> {
    let mut sorted: Vec<&Word> = words.iter().collect();
    sorted.sort_by(|a, b| a.top.total_cmp(&b.top).then(a.x0.total_cmp(&b.x0)));

    let mut lines = Vec::new();
    let mut current: Line = Vec::new();
    let mut anchor: Option<f32> = None;

    for word in sorted {
        let top = *anchor.get_or_insert(word.top);
        if (word.top - top).abs() > tolerance {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            anchor = Some(word.top);
        }
        current.push(word.clone());
    }

    if !current.is_empty() {
        lines.push(current);
    }

    // Words of a line can come out of the (top, x0) sort out of horizontal
    // order when their tops differ slightly.
    for line in &mut lines {
        line.sort_by(|a, b| a.x0.total_cmp(&b.x0));
    }

    lines
}
