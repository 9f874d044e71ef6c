/// Host and path prefix of the image CDN.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageSize {
    Small,
    #[default]
    Medium,
    Large,
    Original,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageKind {
    #[default]
    Poster,
    Backdrop,
}

impl ImageKind {
    fn size_segment(self, size: ImageSize) -> &'static str {
        match (self, size) {
            (ImageKind::Poster, ImageSize::Small) => "/w200",
            (ImageKind::Poster, ImageSize::Medium) => "/w500",
            (ImageKind::Poster, ImageSize::Large) => "/w780",
            (ImageKind::Backdrop, ImageSize::Small) => "/w300",
            (ImageKind::Backdrop, ImageSize::Medium) => "/w780",
            (ImageKind::Backdrop, ImageSize::Large) => "/w1280",
            (_, ImageSize::Original) => "/original",
        }
    }
}

/// Full image URL for a catalog-supplied relative `path`, or `None` when the
/// item has no image.
pub fn image_url(path: Option<&str>, size: ImageSize, kind: ImageKind) -> Option<String> {
    image_url_with_base(IMAGE_BASE_URL, path, size, kind)
}

pub fn image_url_with_base(
    base: &str,
    path: Option<&str>,
    size: ImageSize,
    kind: ImageKind,
) -> Option<String> {
    let path = path.filter(|path| !path.is_empty())?;
    Some(format!(
        "{}{}{path}",
        base.trim_end_matches('/'),
        kind.size_segment(size)
    ))
}
