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

use crate::collection::Collection;
use crate::error::Fallible;

pub fn check_collection(directory: Option<String>) -> Fallible<()> {
    let _ = Collection::open(directory)?;
    println!("ok");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::TempDir;

    use super::check_collection;

    #[test]
    fn test_non_existent_directory() {
        assert!(check_collection(Some("./derpherp".to_string())).is_err());
    }

    #[test]
    fn test_valid_collection() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path().join("animals.json"),
            r#"[{"front": "el perro", "back": "the dog"}]"#,
        )
        .unwrap();
        let directory = dir.path().to_string_lossy().into_owned();
        assert!(check_collection(Some(directory)).is_ok());
    }

    #[test]
    fn test_invalid_folder_file() {
        let dir = TempDir::new().unwrap();
        write(dir.path().join("animals.json"), r#"[{"front": "el perro"}]"#).unwrap();
        let directory = dir.path().to_string_lossy().into_owned();
        assert!(check_collection(Some(directory)).is_err());
    }
}
