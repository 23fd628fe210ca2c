use crate::models::ReviewWord;

/// Map a 0-10 review score to a 1-5 tier (0 when there is no score).
///
/// Lower bounds are inclusive: 9+ is 5, 8+ is 4, 7+ is 3, 6+ is 2,
/// anything above zero is 1.
pub fn review_tier(score: f64) -> u8 {
    if score >= 9.0 {
        5
    } else if score >= 8.0 {
        4
    } else if score >= 7.0 {
        3
    } else if score >= 6.0 {
        2
    } else if score > 0.0 {
        1
    } else {
        0
    }
}

/// Review word for a 0-10 cumulative score; `None` for zero
pub fn review_word(score: f64) -> Option<ReviewWord> {
    if score >= 8.0 {
        Some(ReviewWord::Excellent)
    } else if score >= 7.0 {
        Some(ReviewWord::Good)
    } else if score >= 5.0 {
        Some(ReviewWord::Average)
    } else if score > 0.0 {
        Some(ReviewWord::Poor)
    } else {
        None
    }
}
