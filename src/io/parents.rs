use crate::error::KnetError;
use crate::index::{parent_tile, tile_name};
use log::{debug, warn};
use std::collections::{HashMap, HashSet};
use std::io::BufRead;

/// Parent tiles of a list of child tiles, in input order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParentList {
    parents: Vec<String>,
    counts: HashMap<String, usize>,
}

impl ParentList {
    pub fn push(&mut self, parent: String) {
        *self.counts.entry(parent.clone()).or_insert(0) += 1;
        self.parents.push(parent);
    }

    /// One parent per child, duplicates included.
    pub fn parents(&self) -> &[String] {
        &self.parents
    }

    /// Number of children with `parent` as their parent.
    pub fn count(&self, parent: &str) -> usize {
        self.counts.get(parent).copied().unwrap_or(0)
    }

    /// Distinct parents in order of first appearance, with child counts.
    pub fn unique(&self) -> Vec<(&str, usize)> {
        let mut seen = HashSet::with_capacity(self.counts.len());
        self.parents
            .iter()
            .filter(|parent| seen.insert(parent.as_str()))
            .map(|parent| (parent.as_str(), self.count(parent)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Output lines, optionally deduplicated and annotated with child counts.
    pub fn render(&self, unique: bool, count: bool) -> Vec<String> {
        let line = |parent: &str, n: usize| {
            if count {
                format!("{:<20} {}", parent, n)
            } else {
                parent.to_string()
            }
        };

        if unique {
            self.unique()
                .into_iter()
                .map(|(parent, n)| line(parent, n))
                .collect()
        } else {
            self.parents
                .iter()
                .map(|parent| line(parent, self.count(parent)))
                .collect()
        }
    }
}

/// Collects the next coarser parent of every tile name found in `names`.
///
/// Entries without a tile name and `100km` tiles are skipped.
pub fn parents_of<I, S>(names: I) -> Result<ParentList, KnetError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut list = ParentList::default();

    for entry in names {
        let entry = entry.as_ref().trim();
        if entry.is_empty() {
            continue;
        }

        let Ok(name) = tile_name(entry) else {
            debug!("{}: No kvadratnet tile name found. Skipping.", entry);
            continue;
        };

        match parent_tile(&name, None) {
            Ok(parent) => list.push(parent),
            Err(KnetError::NoParentTile(_)) => {
                warn!("{}: Tile has no parent. Skipping.", name);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(list)
}

/// Reads child tiles, one per line, and collects their parents.
pub fn list_parents<R: BufRead>(reader: R) -> Result<ParentList, KnetError> {
    let lines = reader
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| KnetError::IoError(e.to_string()))?;
    parents_of(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const CHILDREN: &str = "\
dtm/1km_6223_575.tif
dtm/1km_6223_576.tif
dtm/1km_6231_575.tif

dtm/readme.txt
dtm/1km_6224_579.tif
";

    #[test]
    fn test_list_parents() -> Result<(), KnetError> {
        let list = list_parents(Cursor::new(CHILDREN))?;

        assert_eq!(
            list.parents(),
            &["10km_622_57", "10km_622_57", "10km_623_57", "10km_622_57"]
        );
        assert_eq!(list.count("10km_622_57"), 3);
        assert_eq!(list.count("10km_999_99"), 0);
        Ok(())
    }

    #[test]
    fn test_unique_parents() -> Result<(), KnetError> {
        let list = list_parents(Cursor::new(CHILDREN))?;
        assert_eq!(list.unique(), vec![("10km_622_57", 3), ("10km_623_57", 1)]);
        Ok(())
    }

    #[test]
    fn test_render() -> Result<(), KnetError> {
        let list = parents_of(["1km_6223_575", "1km_6231_575"])?;

        assert_eq!(list.render(false, false), vec!["10km_622_57", "10km_623_57"]);
        assert_eq!(
            list.render(true, true),
            vec![
                "10km_622_57          1".to_string(),
                "10km_623_57          1".to_string()
            ]
        );
        Ok(())
    }

    #[test]
    fn test_render_counts_without_unique() -> Result<(), KnetError> {
        let list = parents_of(["1km_6223_575", "1km_6223_576"])?;
        assert_eq!(
            list.render(false, true),
            vec!["10km_622_57          2", "10km_622_57          2"]
        );
        Ok(())
    }

    #[test]
    fn test_skips_largest_unit() -> Result<(), KnetError> {
        let list = parents_of(["100km_62_5", "50km_620_55"])?;
        assert_eq!(list.parents(), &["100km_62_5"]);
        Ok(())
    }
}
