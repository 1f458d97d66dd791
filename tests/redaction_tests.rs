use dilekce_server::redaction::{chars_to_mask, mask, mask_random, MASK_GLYPH};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const PETITION: &str = "AİLE MAHKEMESİ HAKİMLİĞİNE\n\n\
Davacı: Ayşe Yılmaz\n\
Konu: Şiddetli geçimsizlik nedeniyle boşanma talebidir.\n\
Açıklamalar: Davalı ile evliliğimiz sürdürülemez hale gelmiştir.";

#[test]
fn test_mask_properties_hold_for_many_seeds() {
    let plain: Vec<char> = PETITION.chars().collect();
    let limit = chars_to_mask(plain.len());

    for seed in 0..50 {
        let masked: Vec<char> = mask(PETITION, &mut StdRng::seed_from_u64(seed))
            .chars()
            .collect();

        assert_eq!(masked.len(), plain.len());
        let mut hidden = 0;
        for (before, after) in plain.iter().zip(&masked) {
            if *before == ' ' || *before == '\n' {
                assert_eq!(before, after);
            } else if after != before {
                assert_eq!(*after, MASK_GLYPH);
                hidden += 1;
            }
        }
        assert!(hidden <= limit);
    }
}

#[test]
fn test_counts_characters_not_bytes() {
    // 10 two-byte characters
    assert_eq!(chars_to_mask("ğüşıöçĞÜŞİ".chars().count()), 3);
    let masked = mask("ğüşıöçĞÜŞİ", &mut StdRng::seed_from_u64(5));
    assert_eq!(masked.chars().filter(|&c| c == MASK_GLYPH).count(), 3);
}

#[test]
fn test_random_masks_differ() {
    let masks: Vec<String> = (0..5).map(|_| mask_random(PETITION)).collect();
    assert!(masks.iter().any(|m| m != &masks[0]));
    assert!(masks.iter().all(|m| m.chars().count() == PETITION.chars().count()));
}

#[test]
fn test_selected_whitespace_is_not_replaced_by_other_positions() {
    // half letters, half spaces: 30 picks out of 100 virtually always hit a space
    let text = "a ".repeat(50);
    let limit = chars_to_mask(100);
    assert_eq!(limit, 30);

    for seed in [1u64, 7, 42] {
        let masked = mask(&text, &mut StdRng::seed_from_u64(seed));
        let hidden = masked.chars().filter(|&c| c == MASK_GLYPH).count();

        // replay the same shuffle to see which positions were picked
        let mut indices: Vec<usize> = (0..100).collect();
        indices.shuffle(&mut StdRng::seed_from_u64(seed));
        let picked_letters = indices[..limit].iter().filter(|&&i| i % 2 == 0).count();

        assert_eq!(hidden, picked_letters);
        assert!(hidden < limit);
    }
}
