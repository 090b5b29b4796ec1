// Copyright 2026 The wordmill authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Loading vocabulary cards from the folder files in a collection
//! directory.
//!
//! A folder is a JSON file holding an array of card objects. The file's
//! stem is the folder name, so `animals.json` is the folder `animals`.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use walkdir::WalkDir;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::Card;
use crate::types::item_id::ItemId;

/// A card as written in a folder file.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CardEntry {
    front: String,
    back: String,
    #[serde(default)]
    example: Option<String>,
}

/// Load every folder file under `directory`, in file name order. Cards
/// keep the order they have in their file.
pub fn load_folders(directory: &Path) -> Fallible<Vec<Card>> {
    let mut cards: Vec<Card> = Vec::new();
    let mut seen: HashSet<ItemId> = HashSet::new();
    for entry in WalkDir::new(directory).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            let folder: &str = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .ok_or_else(|| {
                    ErrorReport::new(format!("invalid folder file name: {}", path.display()))
                })?;
            let contents = std::fs::read_to_string(path)
                .map_err(|e| ErrorReport::new(format!("{}: {}", path.display(), e)))?;
            let entries: Vec<CardEntry> = serde_json::from_str(&contents)
                .map_err(|e| ErrorReport::new(format!("{}: {}", path.display(), e)))?;
            for (position, card) in entries.into_iter().enumerate() {
                if card.front.trim().is_empty() {
                    return fail(format!(
                        "{}: card {} has a blank front.",
                        path.display(),
                        position + 1
                    ));
                }
                if card.back.trim().is_empty() {
                    return fail(format!(
                        "{}: card {} has a blank back.",
                        path.display(),
                        position + 1
                    ));
                }
                let card = Card::new(folder, card.front, card.back, card.example);
                if !seen.insert(card.item_id()) {
                    return fail(format!(
                        "duplicate card '{}' in folder '{}'.",
                        card.front(),
                        card.folder()
                    ));
                }
                cards.push(card);
            }
        }
    }
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use std::fs::create_dir;
    use std::fs::write;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_load_folders() -> Fallible<()> {
        let dir = TempDir::new()?;
        write(
            dir.path().join("animals.json"),
            r#"[
                {"front": "el perro", "back": "the dog"},
                {"front": "el gato", "back": "the cat", "example": "El gato duerme."}
            ]"#,
        )?;
        write(
            dir.path().join("colors.json"),
            r#"[{"front": "rojo", "back": "red"}]"#,
        )?;
        let cards = load_folders(dir.path())?;
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].folder(), "animals");
        assert_eq!(cards[0].front(), "el perro");
        assert_eq!(cards[0].back(), "the dog");
        assert_eq!(cards[0].example(), None);
        assert_eq!(cards[1].example(), Some("El gato duerme."));
        assert_eq!(cards[2].folder(), "colors");
        Ok(())
    }

    #[test]
    fn test_empty_folder_file() -> Fallible<()> {
        let dir = TempDir::new()?;
        write(dir.path().join("empty.json"), "[]")?;
        let cards = load_folders(dir.path())?;
        assert!(cards.is_empty());
        Ok(())
    }

    #[test]
    fn test_invalid_json_names_the_file() -> Fallible<()> {
        let dir = TempDir::new()?;
        write(dir.path().join("broken.json"), "[{")?;
        let err = load_folders(dir.path()).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
        Ok(())
    }

    #[test]
    fn test_unreadable_file_names_the_file() -> Fallible<()> {
        let dir = TempDir::new()?;
        // Not UTF-8, so the read itself fails before parsing starts.
        write(dir.path().join("latin1.json"), [0xffu8, 0xfe, 0x6e])?;
        let err = load_folders(dir.path()).unwrap_err();
        assert!(err.to_string().contains("latin1.json"));
        Ok(())
    }

    #[test]
    fn test_unknown_field_is_rejected() -> Fallible<()> {
        let dir = TempDir::new()?;
        write(
            dir.path().join("typo.json"),
            r#"[{"front": "uno", "back": "one", "exmaple": "Uno, dos."}]"#,
        )?;
        let err = load_folders(dir.path()).unwrap_err();
        assert!(err.to_string().contains("typo.json"));
        Ok(())
    }

    #[test]
    fn test_blank_front_is_rejected() -> Fallible<()> {
        let dir = TempDir::new()?;
        write(
            dir.path().join("blank.json"),
            r#"[{"front": "uno", "back": "one"}, {"front": "  ", "back": "two"}]"#,
        )?;
        let err = load_folders(dir.path()).unwrap_err();
        assert!(err.to_string().contains("card 2 has a blank front."));
        Ok(())
    }

    #[test]
    fn test_blank_back_is_rejected() -> Fallible<()> {
        let dir = TempDir::new()?;
        write(dir.path().join("blank.json"), r#"[{"front": "uno", "back": ""}]"#)?;
        let err = load_folders(dir.path()).unwrap_err();
        assert!(err.to_string().contains("card 1 has a blank back."));
        Ok(())
    }

    #[test]
    fn test_duplicate_card_is_rejected() -> Fallible<()> {
        let dir = TempDir::new()?;
        write(
            dir.path().join("dup.json"),
            r#"[
                {"front": "el perro", "back": "the dog"},
                {"front": "el perro", "back": "the hound"}
            ]"#,
        )?;
        let err = load_folders(dir.path()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "error: duplicate card 'el perro' in folder 'dup'."
        );
        Ok(())
    }

    #[test]
    fn test_same_front_in_different_folders_is_allowed() -> Fallible<()> {
        let dir = TempDir::new()?;
        write(dir.path().join("a.json"), r#"[{"front": "banco", "back": "bank"}]"#)?;
        write(dir.path().join("b.json"), r#"[{"front": "banco", "back": "bench"}]"#)?;
        let cards = load_folders(dir.path())?;
        assert_eq!(cards.len(), 2);
        assert_ne!(cards[0].item_id(), cards[1].item_id());
        Ok(())
    }

    #[test]
    fn test_non_json_files_are_ignored() -> Fallible<()> {
        let dir = TempDir::new()?;
        write(dir.path().join("notes.txt"), "not a folder file")?;
        write(dir.path().join("wordmill.toml"), "[learn]\nbatch_size = 5\n")?;
        write(dir.path().join("words.json"), r#"[{"front": "sí", "back": "yes"}]"#)?;
        let cards = load_folders(dir.path())?;
        assert_eq!(cards.len(), 1);
        Ok(())
    }

    #[test]
    fn test_nested_directories_are_walked() -> Fallible<()> {
        let dir = TempDir::new()?;
        create_dir(dir.path().join("spanish"))?;
        write(
            dir.path().join("spanish").join("food.json"),
            r#"[{"front": "el pan", "back": "the bread"}]"#,
        )?;
        let cards = load_folders(dir.path())?;
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].folder(), "food");
        Ok(())
    }

    #[test]
    fn test_whitespace_is_trimmed() -> Fallible<()> {
        let dir = TempDir::new()?;
        write(
            dir.path().join("trim.json"),
            r#"[{"front": "  hola ", "back": " hello", "example": "   "}]"#,
        )?;
        let cards = load_folders(dir.path())?;
        assert_eq!(cards[0].front(), "hola");
        assert_eq!(cards[0].back(), "hello");
        assert_eq!(cards[0].example(), None);
        Ok(())
    }
}
