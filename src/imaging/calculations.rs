//! Pure calculation functions for thumbnail dimensions.

/// Calculate output dimensions that fit within a square bounding box.
///
/// Preserves aspect ratio; neither returned dimension exceeds
/// `max_dimension`. Images already inside the box keep their original
/// dimensions — thumbnails are never upscaled.
///
/// # Examples
/// ```
/// # use lightgrid::imaging::calculate_fit_dimensions;
/// // 4:3 landscape bounded to 300 → 300x225
/// assert_eq!(calculate_fit_dimensions((800, 600), 300), (300, 225));
///
/// // Portrait: the height is the long edge
/// assert_eq!(calculate_fit_dimensions((600, 800), 300), (225, 300));
///
/// // Already small enough: untouched
/// assert_eq!(calculate_fit_dimensions((200, 100), 300), (200, 100));
/// ```
pub fn calculate_fit_dimensions(source: (u32, u32), max_dimension: u32) -> (u32, u32) {
    let (src_w, src_h) = source;
    if src_w.max(src_h) <= max_dimension {
        return (src_w, src_h);
    }

    if src_w >= src_h {
        let w = max_dimension;
        let h = (max_dimension as f64 * src_h as f64 / src_w as f64).round() as u32;
        (w, h.max(1))
    } else {
        let h = max_dimension;
        let w = (max_dimension as f64 * src_w as f64 / src_h as f64).round() as u32;
        (w.max(1), h)
    }
}
