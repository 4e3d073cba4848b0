//! Label table: ordered mapping from model class index to breed name
//!
//! Loaded once at startup from a CSV file with `id` and `breed` columns.
//! Rows are sorted by `id` ascending; the resulting row order must match
//! the class ordering the model was trained with. That contract is
//! established outside this process and cannot be verified here.

use std::fs::File;
use std::path::Path;

use polars::prelude::*;

use crate::error::{BreedwiseError, Result};

/// Immutable, ordered breed label table.
#[derive(Debug, Clone)]
pub struct LabelTable {
    breeds: Vec<String>,
}

impl LabelTable {
    /// Load labels from a CSV file with at least `id` and `breed` columns.
    ///
    /// Fails if the file is missing, malformed, lacks either column, or
    /// contains no rows. A failure here must abort startup.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            BreedwiseError::LabelTable(format!("cannot open {}: {}", path.display(), e))
        })?;

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(100))
            .into_reader_with_file_handle(file)
            .finish()
            .map_err(|e| {
                BreedwiseError::LabelTable(format!("cannot parse {}: {}", path.display(), e))
            })?;

        // Class index order is the id-ascending row order.
        let df = df
            .sort(["id"], SortMultipleOptions::default())
            .map_err(|e| BreedwiseError::LabelTable(format!("cannot sort by 'id' column: {}", e)))?;

        let col = df
            .column("breed")
            .map_err(|_| BreedwiseError::LabelTable("missing 'breed' column".to_string()))?;
        let ca = col
            .str()
            .map_err(|_| BreedwiseError::LabelTable("'breed' column is not text".to_string()))?;

        let breeds = ca
            .into_iter()
            .map(|opt| {
                opt.map(str::to_string)
                    .ok_or_else(|| BreedwiseError::LabelTable("null 'breed' entry".to_string()))
            })
            .collect::<Result<Vec<String>>>()?;

        if breeds.is_empty() {
            return Err(BreedwiseError::LabelTable(format!(
                "{} contains no label rows",
                path.display()
            )));
        }

        Ok(Self { breeds })
    }

    /// Build a table from an already-ordered label list.
    pub fn from_breeds(breeds: Vec<String>) -> Self {
        Self { breeds }
    }

    /// Breed name for a class index, if the index is in range.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.breeds.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.breeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breeds.is_empty()
    }
}
