// ==========================================
// 日期感知 - 节假日年表缓存
// ==========================================
// 存储: {cache_dir}/{year}.json,内容为 HolidayYearTable 的 JSON
// 流程: 内存表 -> 本地文件 -> 远程下载(非空时写回文件)
// 红线: 空结果不缓存; 读写失败只记录日志,视为"不存在"
// 并发: 每个年份一把异步锁,同一年份的并发未命中只下载一次
//       本次查找结束后(写入内存或得到空表)释放该年份的锁
// ==========================================

use crate::domain::HolidayYearTable;
use crate::holiday::error::{HolidayError, HolidayResult};
use crate::holiday::remote::RemoteHolidaySource;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

// ==========================================
// HolidayStore Trait - 年表持久化
// ==========================================
// 实现者: JsonFileStore
#[async_trait]
pub trait HolidayStore: Send + Sync {
    /// 读取某年年表
    ///
    /// # 返回
    /// - Ok(Some): 文件存在且解析成功
    /// - Ok(None): 文件不存在
    /// - Err(Io/Malformed): 读取或解析失败
    async fn load(&self, year: i32) -> HolidayResult<Option<HolidayYearTable>>;

    /// 写入某年年表（覆盖）
    async fn save(&self, year: i32, table: &HolidayYearTable) -> HolidayResult<()>;
}

/// 每年一个 JSON 文件的本地存储
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, year: i32) -> PathBuf {
        self.dir.join(format!("{}.json", year))
    }
}

#[async_trait]
impl HolidayStore for JsonFileStore {
    async fn load(&self, year: i32) -> HolidayResult<Option<HolidayYearTable>> {
        let path = self.path_for(year);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(HolidayError::io(path.display().to_string(), e)),
        };

        let table: HolidayYearTable = serde_json::from_str(&content)
            .map_err(|e| HolidayError::malformed(path.display().to_string(), e))?;
        Ok(Some(table))
    }

    async fn save(&self, year: i32, table: &HolidayYearTable) -> HolidayResult<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| HolidayError::io(self.dir.display().to_string(), e))?;

        let path = self.path_for(year);
        let json = serde_json::to_string_pretty(table)
            .map_err(|e| HolidayError::malformed(path.display().to_string(), e))?;

        // 先写临时文件再改名,避免读到写了一半的文件
        let tmp_path = self.dir.join(format!("{}.json.tmp", year));
        tokio::fs::write(&tmp_path, json)
            .await
            .map_err(|e| HolidayError::io(tmp_path.display().to_string(), e))?;
        tokio::fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| HolidayError::io(path.display().to_string(), e))?;
        Ok(())
    }
}

// ==========================================
// HolidayCache - 年表缓存
// ==========================================
pub struct HolidayCache {
    store: Box<dyn HolidayStore>,
    remote: Arc<dyn RemoteHolidaySource>,
    tables: RwLock<HashMap<i32, Arc<HolidayYearTable>>>,
    year_locks: Mutex<HashMap<i32, Arc<Mutex<()>>>>,
}

impl HolidayCache {
    pub fn new(store: Box<dyn HolidayStore>, remote: Arc<dyn RemoteHolidaySource>) -> Self {
        Self {
            store,
            remote,
            tables: RwLock::new(HashMap::new()),
            year_locks: Mutex::new(HashMap::new()),
        }
    }

    /// 获取某年年表（可能为空表）
    ///
    /// 本地文件存在且非空时直接使用,不检查新旧,不与远程数据合并
    pub async fn get_year_table(&self, year: i32) -> Arc<HolidayYearTable> {
        if let Some(table) = self.memoized(year).await {
            return table;
        }

        let year_lock = self.year_lock(year).await;
        let _guard = year_lock.lock().await;

        // 等锁期间可能已由其他调用填充
        if let Some(table) = self.memoized(year).await {
            return table;
        }

        match self.store.load(year).await {
            Ok(Some(table)) if !table.is_empty() => {
                tracing::debug!("从缓存加载 {} 年节假日数据", year);
                return self.memoize(year, table).await;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!("加载节假日缓存失败: {}", e);
            }
        }

        let fetched = self.remote.fetch(year).await;
        if fetched.is_empty() {
            self.year_locks.lock().await.remove(&year);
            return Arc::new(HolidayYearTable::empty());
        }

        match self.store.save(year, &fetched).await {
            Ok(()) => tracing::debug!("节假日数据已缓存: {} 年", year),
            Err(e) => tracing::error!("保存节假日缓存失败: {}", e),
        }
        self.memoize(year, fetched).await
    }

    async fn memoized(&self, year: i32) -> Option<Arc<HolidayYearTable>> {
        self.tables.read().await.get(&year).cloned()
    }

    async fn memoize(&self, year: i32, table: HolidayYearTable) -> Arc<HolidayYearTable> {
        let table = Arc::new(table);
        self.tables.write().await.insert(year, Arc::clone(&table));
        // 后续调用在内存表命中,不再需要该年份的锁
        self.year_locks.lock().await.remove(&year);
        table
    }

    async fn year_lock(&self, year: i32) -> Arc<Mutex<()>> {
        let mut locks = self.year_locks.lock().await;
        Arc::clone(locks.entry(year).or_default())
    }
}
