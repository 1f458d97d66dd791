//! Partial masking of generated text for the unpaid preview.

use rand::seq::SliceRandom;
use rand::Rng;

/// Glyph substituted for hidden characters.
pub const MASK_GLYPH: char = '█';

/// Share of character positions selected for masking.
pub const MASK_RATIO: f64 = 0.3;

/// Number of positions selected for a text of `len` characters.
pub fn chars_to_mask(len: usize) -> usize {
    (len as f64 * MASK_RATIO).floor() as usize
}

/// Hide roughly 30% of `text` behind [`MASK_GLYPH`].
///
/// A uniform shuffle of all positions picks `chars_to_mask(len)` of them.
/// Spaces and newlines among the picks are left as they are and no other
/// position is masked in their place, so the realised ratio can fall short.
pub fn mask<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    let count = chars_to_mask(chars.len());

    let mut indices: Vec<usize> = (0..chars.len()).collect();
    indices.shuffle(rng);

    for &index in &indices[..count] {
        if chars[index] != ' ' && chars[index] != '\n' {
            chars[index] = MASK_GLYPH;
        }
    }

    chars.into_iter().collect()
}

/// [`mask`] with the thread-local generator; every call masks anew.
pub fn mask_random(text: &str) -> String {
    mask(text, &mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_same_seed_same_mask() {
        let text = "Sayın Hakimliğe,\nDavacı olarak aşağıdaki hususları arz ederim.";
        let a = mask(text, &mut StdRng::seed_from_u64(7));
        let b = mask(text, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_short_text_untouched() {
        // floor(3 * 0.3) == 0
        assert_eq!(mask("abc", &mut StdRng::seed_from_u64(1)), "abc");
        assert_eq!(mask("", &mut StdRng::seed_from_u64(1)), "");
    }

    #[test]
    fn test_exact_count_without_whitespace() {
        let text = "abcdefghijklmnopqrst";
        let masked = mask(text, &mut StdRng::seed_from_u64(99));
        let hidden = masked.chars().filter(|&c| c == MASK_GLYPH).count();
        assert_eq!(hidden, 6);
    }

    #[test]
    fn test_whitespace_only_never_masked() {
        let text = "  \n \n   \n";
        assert_eq!(mask(text, &mut StdRng::seed_from_u64(3)), text);
    }
}
