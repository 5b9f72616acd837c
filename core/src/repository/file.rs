use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::warn;

use crate::error::Result;
use crate::model::dataset::AllStoresData;
use crate::model::record::SalesRecord;
use crate::model::store::Store;
use crate::repository::traits::SalesRepository;

/// JSON スナップショット (`{"栄": [ {...}, ... ], ...}`) から売上を読む。
#[derive(Clone)]
pub struct FileSalesRepository {
    file_path: PathBuf,
}

impl FileSalesRepository {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn load(&self) -> Result<AllStoresData> {
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);
        let raw: BTreeMap<String, Vec<SalesRecord>> = serde_json::from_reader(reader)?;

        let mut data = AllStoresData::new();
        for (sheet, records) in raw {
            match Store::from_sheet_name(&sheet) {
                Some(store) => {
                    data.insert(store, records);
                }
                None => warn!("skipping unknown sheet '{}' in {}", sheet, self.file_path.display()),
            }
        }
        Ok(data)
    }

    pub fn save(&self, data: &AllStoresData) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw: BTreeMap<&str, &Vec<SalesRecord>> =
            data.iter().map(|(store, records)| (store.sheet_name(), records)).collect();

        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &raw)?;
        writer.flush()?;
        Ok(())
    }
}

impl SalesRepository for FileSalesRepository {
    fn fetch_store(&self, store: Store) -> Result<Vec<SalesRecord>> {
        Ok(self.load()?.remove(&store).unwrap_or_default())
    }

    fn fetch_all(&self) -> Result<AllStoresData> {
        // 1回読めば十分。スナップショットにない店舗は空で補う
        let mut data = self.load()?;
        for store in Store::ALL {
            data.entry(store).or_default();
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::field::SalesField;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSalesRepository::new(dir.path().join("nested").join("snapshot.json"));

        let mut data = AllStoresData::new();
        data.insert(
            Store::Imaike,
            vec![SalesRecord::new("2025/10/05").with(SalesField::Grill, 4500.0)],
        );
        repo.save(&data).unwrap();

        assert!(repo.path().ends_with("nested/snapshot.json"));
        assert!(repo.path().is_file());
        assert_eq!(repo.load().unwrap(), data);
        let all = repo.fetch_all().unwrap();
        assert_eq!(all.len(), Store::ALL.len());
        assert!(all[&Store::Sakae].is_empty());
        assert_eq!(repo.fetch_store(Store::Imaike).unwrap(), data[&Store::Imaike]);
    }

    #[test]
    fn test_load_skips_unknown_sheets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        fs::write(
            &path,
            r#"{"栄": [{"対象日": "2025/10/05", "売上日計": 1200}], "本社": []}"#,
        )
        .unwrap();

        let data = FileSalesRepository::new(&path).load().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[&Store::Sakae][0].daily_total, 1200.0);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSalesRepository::new(dir.path().join("missing.json"));
        assert!(repo.fetch_all().is_err());
    }
}
