//! Fixed-size batching of page images for one completion call per batch.

use crate::domain::catalog::SlideImage;

/// Splits images (already in reading order) into consecutive chunks of at
/// most `size`. A zero size is treated as one.
pub fn chunk_images(images: &[SlideImage], size: usize) -> std::slice::Chunks<'_, SlideImage> {
    images.chunks(size.max(1))
}

/// Number of completion calls a batch of `len` images needs.
pub fn chunk_count(len: usize, size: usize) -> usize {
    let size = size.max(1);
    (len + size - 1) / size
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SlideId;
    use proptest::prelude::*;

    fn deck(count: usize) -> Vec<SlideImage> {
        let slide = SlideId::new();
        (0..count)
            .map(|order| SlideImage::new(slide, "url", order as i32))
            .collect()
    }

    #[test]
    fn twenty_five_images_in_chunks_of_five() {
        let images = deck(25);
        let chunks: Vec<_> = chunk_images(&images, 5).collect();
        assert_eq!(chunks.len(), 5);
        assert!(chunks.iter().all(|c| c.len() == 5));
        assert_eq!(chunks[4][0].order, 20);
    }

    #[test]
    fn remainder_forms_short_final_chunk() {
        let images = deck(12);
        let sizes: Vec<_> = chunk_images(&images, 10).map(|c| c.len()).collect();
        assert_eq!(sizes, vec![10, 2]);
    }

    proptest! {
        #[test]
        fn chunks_are_disjoint_and_cover_in_order(len in 0usize..60, size in 1usize..12) {
            let images = deck(len);
            let chunks: Vec<_> = chunk_images(&images, size).collect();
            prop_assert_eq!(chunks.len(), chunk_count(len, size));

            let flattened: Vec<i32> = chunks.iter().flat_map(|c| c.iter().map(|i| i.order)).collect();
            let expected: Vec<i32> = (0..len as i32).collect();
            prop_assert_eq!(flattened, expected);
        }
    }
}
