use std::path::{Path, PathBuf};

use crate::fs::Filesystem;
use crate::size::format_size;

const BUSINESS_FOLDER: &str = "WhatsApp Business";
const DEFAULT_FOLDER: &str = "WhatsApp";

/// Icon shown for a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryIcon {
    Image,
    Video,
    Document,
    Audio,
    Status,
    Voice,
    VideoNotes,
    Gif,
    Wallpaper,
    Sticker,
    Profile,
}

/// Sub-folder partition of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubView {
    Received,
    Sent,
    Private,
}

impl SubView {
    pub const ALL: [SubView; 3] = [SubView::Received, SubView::Sent, SubView::Private];

    pub fn label(&self) -> &'static str {
        match self {
            SubView::Received => "Received",
            SubView::Sent => "Sent",
            SubView::Private => "Private",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            SubView::Received => 0,
            SubView::Sent => 1,
            SubView::Private => 2,
        }
    }
}

/// A logical media type mapped to a directory under the WhatsApp home
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub path: PathBuf,
    pub icon: CategoryIcon,
    pub has_sent: bool,
    pub has_private: bool,
    /// Human-readable total size, recomputed by `refresh_size`
    pub size_label: String,
}

impl Category {
    fn new(
        name: &str,
        path: PathBuf,
        icon: CategoryIcon,
        has_sent: bool,
        has_private: bool,
    ) -> Self {
        Self {
            name: name.to_string(),
            path,
            icon,
            has_sent,
            has_private,
            size_label: format_size(0),
        }
    }

    /// Sub-views this category offers, Received first
    pub fn sub_views(&self) -> Vec<SubView> {
        let mut views = vec![SubView::Received];
        if self.has_sent {
            views.push(SubView::Sent);
        }
        if self.has_private {
            views.push(SubView::Private);
        }
        views
    }

    pub fn has_view(&self, view: SubView) -> bool {
        match view {
            SubView::Received => true,
            SubView::Sent => self.has_sent,
            SubView::Private => self.has_private,
        }
    }

    /// Directory backing a sub-view
    pub fn path_for(&self, view: SubView) -> PathBuf {
        match view {
            SubView::Received => self.path.clone(),
            SubView::Sent => self.path.join("Sent"),
            SubView::Private => self.path.join("Private"),
        }
    }

    /// Recompute `size_label` from the recursive size of the category directory
    pub fn refresh_size(&mut self, fs: &dyn Filesystem) -> u64 {
        let bytes = fs.directory_size(&self.path);
        self.size_label = format_size(bytes);
        bytes
    }
}

/// App folder name used inside the media directory names
pub fn app_folder_name(home: &Path) -> &'static str {
    let home = home.to_string_lossy().to_lowercase();
    if home.contains(&BUSINESS_FOLDER.to_lowercase()) {
        BUSINESS_FOLDER
    } else {
        DEFAULT_FOLDER
    }
}

/// Build the fixed, ordered list of categories for a WhatsApp home directory
pub fn resolve_categories(home: &Path) -> Vec<Category> {
    let app = app_folder_name(home);
    let media = home.join("Media");
    let app_dir = |suffix: &str| media.join(format!("{} {}", app, suffix));

    let variant = |name: &str, path: PathBuf, icon: CategoryIcon| {
        Category::new(name, path, icon, true, true)
    };
    let single = |name: &str, path: PathBuf, icon: CategoryIcon| {
        Category::new(name, path, icon, false, false)
    };

    vec![
        variant("Images", app_dir("Images"), CategoryIcon::Image),
        variant("Videos", app_dir("Video"), CategoryIcon::Video),
        variant("Documents", app_dir("Documents"), CategoryIcon::Document),
        variant("Audios", app_dir("Audio"), CategoryIcon::Audio),
        single("Statuses", media.join(".Statuses"), CategoryIcon::Status),
        single("Voice Notes", app_dir("Voice Notes"), CategoryIcon::Voice),
        single("Video Notes", app_dir("Video Notes"), CategoryIcon::VideoNotes),
        variant("GIFs", app_dir("Animated Gifs"), CategoryIcon::Gif),
        single("Wallpapers", media.join("WallPaper"), CategoryIcon::Wallpaper),
        single("Stickers", app_dir("Stickers"), CategoryIcon::Sticker),
        single("Profile Photos", app_dir("Profile Photos"), CategoryIcon::Profile),
    ]
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Look up a category by name, ignoring case, spaces, dashes and underscores
pub fn find_category<'a>(categories: &'a [Category], query: &str) -> Option<&'a Category> {
    let query = normalize(query);
    categories.iter().find(|c| normalize(&c.name) == query)
}
