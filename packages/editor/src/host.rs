//! # Layout Hosts
//!
//! Persistence behind a designer session. A host stores two versions of
//! each screen: a *draft* the designer saves freely, and a *published*
//! copy the app renders.
//!
//! ```text
//! <layout dir>/
//!   drafts/<screen>.json
//!   published/<screen>.json
//! ```
//!
//! Loading prefers the draft, then the published copy, then an empty
//! layout.

use std::collections::HashMap;
use std::fs;
use std::path::{Path as FsPath, PathBuf};

use tessera_document::Tree;
use tracing::{debug, info};

use crate::errors::HostError;

pub const DRAFTS_DIR: &str = "drafts";
pub const PUBLISHED_DIR: &str = "published";

/// Storage for screen layouts
pub trait LayoutHost {
    /// Current layout of a screen. Unknown screens load as empty layouts.
    fn load_layout(&self, screen_id: &str) -> Result<Tree, HostError>;

    /// Store a draft. Returns false when the stored draft was already
    /// identical.
    fn save_draft(&mut self, screen_id: &str, tree: &Tree) -> Result<bool, HostError>;

    /// Promote the draft to published. Returns false when there is no
    /// draft.
    fn publish(&mut self, screen_id: &str) -> Result<bool, HostError>;
}

/// Screen ids become file names, so they are limited to a safe alphabet
pub fn validate_screen_id(screen_id: &str) -> Result<(), HostError> {
    let valid = !screen_id.is_empty()
        && !screen_id.starts_with('.')
        && screen_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(HostError::InvalidScreenId(screen_id.to_string()))
    }
}

/// Host backed by JSON files under one directory
#[derive(Debug, Clone)]
pub struct FileLayoutHost {
    root: PathBuf,
}

impl FileLayoutHost {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &FsPath {
        &self.root
    }

    pub fn draft_path(&self, screen_id: &str) -> PathBuf {
        self.root.join(DRAFTS_DIR).join(format!("{}.json", screen_id))
    }

    pub fn published_path(&self, screen_id: &str) -> PathBuf {
        self.root
            .join(PUBLISHED_DIR)
            .join(format!("{}.json", screen_id))
    }

    /// Create the directory layout
    pub fn init(&self) -> Result<(), HostError> {
        fs::create_dir_all(self.root.join(DRAFTS_DIR))?;
        fs::create_dir_all(self.root.join(PUBLISHED_DIR))?;
        Ok(())
    }

    /// Screen ids with a draft or a published layout, sorted
    pub fn screens(&self) -> Result<Vec<String>, HostError> {
        let mut screens = Vec::new();
        for dir in [DRAFTS_DIR, PUBLISHED_DIR] {
            let dir = self.root.join(dir);
            if !dir.is_dir() {
                continue;
            }
            for entry in fs::read_dir(dir)? {
                let path = entry?.path();
                if path.extension().and_then(|e| e.to_str()) != Some("json") {
                    continue;
                }
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    screens.push(stem.to_string());
                }
            }
        }
        screens.sort();
        screens.dedup();
        Ok(screens)
    }

    fn read(&self, screen_id: &str, path: &FsPath) -> Result<Tree, HostError> {
        let source = fs::read_to_string(path)?;
        Tree::from_json_str(&source).map_err(|source| HostError::Layout {
            screen: screen_id.to_string(),
            source,
        })
    }

    fn render(screen_id: &str, tree: &Tree) -> Result<String, HostError> {
        tree.to_json_string_pretty()
            .map(|mut text| {
                text.push('\n');
                text
            })
            .map_err(|source| HostError::Layout {
                screen: screen_id.to_string(),
                source,
            })
    }
}

impl LayoutHost for FileLayoutHost {
    fn load_layout(&self, screen_id: &str) -> Result<Tree, HostError> {
        validate_screen_id(screen_id)?;

        for path in [self.draft_path(screen_id), self.published_path(screen_id)] {
            if path.is_file() {
                debug!(screen = screen_id, path = %path.display(), "Loading layout");
                return self.read(screen_id, &path);
            }
        }
        debug!(screen = screen_id, "No stored layout, starting empty");
        Ok(Tree::new())
    }

    fn save_draft(&mut self, screen_id: &str, tree: &Tree) -> Result<bool, HostError> {
        validate_screen_id(screen_id)?;
        let path = self.draft_path(screen_id);
        let text = Self::render(screen_id, tree)?;

        if fs::read_to_string(&path).ok().as_deref() == Some(text.as_str()) {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, text)?;
        info!(screen = screen_id, path = %path.display(), "Saved draft");
        Ok(true)
    }

    fn publish(&mut self, screen_id: &str) -> Result<bool, HostError> {
        validate_screen_id(screen_id)?;
        let draft = self.draft_path(screen_id);
        if !draft.is_file() {
            return Ok(false);
        }

        // Round-trip through the tree so only valid layouts get published
        let tree = self.read(screen_id, &draft)?;
        let published = self.published_path(screen_id);
        if let Some(parent) = published.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&published, Self::render(screen_id, &tree)?)?;
        info!(screen = screen_id, path = %published.display(), "Published layout");
        Ok(true)
    }
}

/// In-memory host
#[derive(Debug, Clone, Default)]
pub struct MemoryLayoutHost {
    drafts: HashMap<String, Tree>,
    published: HashMap<String, Tree>,
}

impl MemoryLayoutHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a published layout
    pub fn with_published(mut self, screen_id: impl Into<String>, tree: Tree) -> Self {
        self.published.insert(screen_id.into(), tree);
        self
    }

    pub fn draft(&self, screen_id: &str) -> Option<&Tree> {
        self.drafts.get(screen_id)
    }

    pub fn published(&self, screen_id: &str) -> Option<&Tree> {
        self.published.get(screen_id)
    }
}

impl LayoutHost for MemoryLayoutHost {
    fn load_layout(&self, screen_id: &str) -> Result<Tree, HostError> {
        validate_screen_id(screen_id)?;
        Ok(self
            .drafts
            .get(screen_id)
            .or_else(|| self.published.get(screen_id))
            .cloned()
            .unwrap_or_default())
    }

    fn save_draft(&mut self, screen_id: &str, tree: &Tree) -> Result<bool, HostError> {
        validate_screen_id(screen_id)?;
        if self.drafts.get(screen_id) == Some(tree) {
            return Ok(false);
        }
        self.drafts.insert(screen_id.to_string(), tree.clone());
        Ok(true)
    }

    fn publish(&mut self, screen_id: &str) -> Result<bool, HostError> {
        validate_screen_id(screen_id)?;
        match self.drafts.get(screen_id) {
            Some(draft) => {
                self.published.insert(screen_id.to_string(), draft.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
