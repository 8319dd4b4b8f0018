pub const FILLED_STAR: char = '⭐';
pub const EMPTY_STAR: char = '☆';

/// Upper bound on whole-point glyphs for out-of-range ratings
const MAX_GLYPHS: i64 = 100;

/// Render a rating as five star glyphs
///
/// One filled star per whole point, one more filled star when the fractional
/// part is at least one half, empty stars for the rest. Ratings outside 0-5
/// are not validated: a negative slot count simply renders nothing, and the
/// whole part is capped at `MAX_GLYPHS` either way.
pub fn rating_to_stars(rating: f64) -> String {
    let full = (rating.trunc() as i64).clamp(-MAX_GLYPHS, MAX_GLYPHS);
    let half = if rating.fract() >= 0.5 { 1 } else { 0 };
    let empty = 5 - (full + half);

    let mut stars = String::new();
    push_glyphs(&mut stars, FILLED_STAR, full);
    push_glyphs(&mut stars, FILLED_STAR, half);
    push_glyphs(&mut stars, EMPTY_STAR, empty);
    stars
}

fn push_glyphs(out: &mut String, glyph: char, count: i64) {
    for _ in 0..count.max(0) {
        out.push(glyph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(stars: &str) -> (usize, usize) {
        (
            stars.chars().filter(|&c| c == FILLED_STAR).count(),
            stars.chars().filter(|&c| c == EMPTY_STAR).count(),
        )
    }

    #[test]
    fn test_half_star_rounds_up() {
        assert_eq!(counts(&rating_to_stars(4.7)), (5, 0));
        assert_eq!(counts(&rating_to_stars(3.5)), (4, 1));
    }

    #[test]
    fn test_below_half_stays_down() {
        assert_eq!(counts(&rating_to_stars(3.2)), (3, 2));
        assert_eq!(rating_to_stars(3.2), "⭐⭐⭐☆☆");
    }

    #[test]
    fn test_bounds() {
        assert_eq!(rating_to_stars(0.0), "☆☆☆☆☆");
        assert_eq!(rating_to_stars(5.0), "⭐⭐⭐⭐⭐");
    }

    #[test]
    fn test_out_of_range_is_not_validated() {
        // six filled, empty count of -1 renders nothing
        assert_eq!(counts(&rating_to_stars(6.0)), (6, 0));
        assert_eq!(counts(&rating_to_stars(-1.0)), (0, 6));
    }

    #[test]
    fn test_huge_ratings_are_capped() {
        assert_eq!(counts(&rating_to_stars(1e19)), (100, 0));
        assert_eq!(counts(&rating_to_stars(f64::MAX)), (100, 0));
        assert_eq!(counts(&rating_to_stars(-1e19)), (0, 105));
        assert_eq!(counts(&rating_to_stars(f64::NAN)), (0, 5));
    }
}
