//! Slide model and the built-in slide set.

use serde::{Deserialize, Serialize};

/// One carousel entry.
///
/// Slides are immutable once built; the presentation layer only tracks which
/// one is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    /// Render key and ordering hint, unique within one list.
    pub id: u64,
    /// URL of the background image.
    pub image: String,
    /// Headline; may be empty.
    #[serde(default)]
    pub title: String,
    /// Body text shown under the title.
    #[serde(default)]
    pub description: String,
    /// Absolute URL, root-relative path, or bare domain.
    #[serde(default)]
    pub link: String,
}

impl Slide {
    /// Alt text for the slide image: the title, or the description when untitled.
    pub fn alt_text(&self) -> &str {
        if self.title.is_empty() {
            &self.description
        } else {
            &self.title
        }
    }
}

/// Compile-time seed for a built-in slide.
struct SlideSeed {
    id: u64,
    image: &'static str,
    title: &'static str,
    description: &'static str,
    link: &'static str,
}

impl SlideSeed {
    fn to_slide(&self) -> Slide {
        Slide {
            id: self.id,
            image: self.image.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            link: self.link.to_string(),
        }
    }
}

const DEFAULT_SLIDES: [SlideSeed; 5] = [
    SlideSeed {
        id: 1,
        image: "https://images.unsplash.com/photo-1518770660439-4636190af475?w=1920&h=1080&fit=crop",
        title: "최신 기술",
        description: "최신 기술로 구현하는 혁신적인 솔루션",
        link: "/technology",
    },
    SlideSeed {
        id: 2,
        image: "https://images.unsplash.com/photo-1461749280684-dccba630e2f6?w=1920&h=1080&fit=crop",
        title: "코딩 패러다임",
        description: "코딩의 새로운 패러다임을 경험해보세요",
        link: "/programming",
    },
    SlideSeed {
        id: 3,
        image: "https://images.unsplash.com/photo-1581090464777-f3220bbe1b8b?w=1920&h=1080&fit=crop",
        title: "창의적 공간",
        description: "아이디어를 현실로 만드는 창의적 공간",
        link: "/innovation",
    },
    SlideSeed {
        id: 4,
        image: "https://images.unsplash.com/photo-1498050108023-c5249f4df085?w=1920&h=1080&fit=crop",
        title: "개발 환경",
        description: "개발자를 위한 완벽한 작업 환경",
        link: "/workspace",
    },
    SlideSeed {
        id: 5,
        image: "https://images.unsplash.com/photo-1506744038136-46273834b3fb?w=1920&h=1080&fit=crop",
        title: "자연 영감",
        description: "자연에서 영감을 받은 디자인 철학",
        link: "/nature",
    },
];

/// The built-in slide set used whenever remote content is unavailable.
///
/// Always non-empty and always in the same order.
pub fn default_slides() -> Vec<Slide> {
    DEFAULT_SLIDES.iter().map(SlideSeed::to_slide).collect()
}
