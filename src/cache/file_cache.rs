use crate::{
    cache::{BoardCache, PersistedBoard},
    error::Result,
};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// File-based cache: one pretty-printed JSON blob under a fixed namespace
/// directory in the project root
pub struct FileCache {
    root_path: PathBuf,
}

impl FileCache {
    const SHELFBOARD_DIR: &'static str = ".shelfboard";
    const BOARD_FILE: &'static str = "board.json";

    /// Creates a new FileCache rooted at the given directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root_path: root.as_ref().join(Self::SHELFBOARD_DIR),
        }
    }

    fn board_file(&self) -> PathBuf {
        self.root_path.join(Self::BOARD_FILE)
    }
}

impl BoardCache for FileCache {
    fn save(&self, board: &PersistedBoard) -> Result<()> {
        if !self.root_path.exists() {
            fs::create_dir_all(&self.root_path)?;
        }

        let json = serde_json::to_string_pretty(board)?;
        fs::write(self.board_file(), json)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<PersistedBoard>> {
        let board_file = self.board_file();

        if !board_file.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&board_file)?;
        let board: PersistedBoard = serde_json::from_str(&contents)?;

        Ok(Some(board))
    }

    fn clear(&self) -> Result<()> {
        let board_file = self.board_file();

        if board_file.exists() {
            fs::remove_file(board_file)?;
        }
        Ok(())
    }
}
