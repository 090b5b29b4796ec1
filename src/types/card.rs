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

use crate::types::item_id::ItemId;

/// A vocabulary flashcard.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Card {
    /// The name of the folder this card belongs to.
    folder: String,
    /// The word or phrase being learned.
    front: String,
    /// The meaning shown after the learner reveals the card.
    back: String,
    /// An optional example sentence.
    example: Option<String>,
    /// The cached identity of the card.
    item_id: ItemId,
}

impl Card {
    /// Builds a card, trimming surrounding whitespace from every field.
    /// A whitespace-only example collapses to none.
    pub fn new(
        folder: impl Into<String>,
        front: impl Into<String>,
        back: impl Into<String>,
        example: Option<String>,
    ) -> Self {
        let folder = folder.into().trim().to_string();
        let front = front.into().trim().to_string();
        let back = back.into().trim().to_string();
        let example = example
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let item_id = ItemId::of(&folder, &front);
        Self {
            folder,
            front,
            back,
            example,
            item_id,
        }
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub fn front(&self) -> &str {
        &self.front
    }

    pub fn back(&self) -> &str {
        &self.back
    }

    pub fn example(&self) -> Option<&str> {
        self.example.as_deref()
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_trimmed() {
        let card = Card::new(" spanish ", " perro ", " dog ", Some("  ".to_string()));
        assert_eq!(card.folder(), "spanish");
        assert_eq!(card.front(), "perro");
        assert_eq!(card.back(), "dog");
        assert_eq!(card.example(), None);
    }

    #[test]
    fn test_identity_ignores_back_and_example() {
        let a = Card::new("spanish", "perro", "dog", None);
        let b = Card::new(
            "spanish",
            "perro",
            "dog (domestic animal)",
            Some("El perro duerme.".to_string()),
        );
        assert_eq!(a.item_id(), b.item_id());
    }

    #[test]
    fn test_identity_differs_across_folders() {
        let a = Card::new("spanish", "perro", "dog", None);
        let b = Card::new("portuguese", "perro", "dog", None);
        assert_ne!(a.item_id(), b.item_id());
    }
}
