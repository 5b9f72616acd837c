use log::info;
use rayon::prelude::*;

use crate::error::Result;
use crate::model::dataset::AllStoresData;
use crate::model::record::SalesRecord;
use crate::model::store::Store;

pub trait SalesRepository: Sync {
    fn fetch_store(&self, store: Store) -> Result<Vec<SalesRecord>>;

    /// 全店舗を並列に取得する。1店舗でも失敗したら全体を失敗とする。
    fn fetch_all(&self) -> Result<AllStoresData> {
        let data: AllStoresData = Store::ALL[..]
            .par_iter()
            .map(|&store| self.fetch_store(store).map(|records| (store, records)))
            .collect::<Result<_>>()?;

        let total: usize = data.values().map(Vec::len).sum();
        info!("loaded {} records across {} stores", total, data.len());
        Ok(data)
    }
}
