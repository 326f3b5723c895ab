//! 快照存储 - 基础设施层
//!
//! 持有唯一的快照路径，只暴露文件级能力

use crate::error::{AppError, AppResult};
use crate::models::Snapshot;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// 文件状态（供 data_info 展示）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    pub path: String,
    pub exists: bool,
    pub modified: Option<DateTime<Local>>,
    pub size: Option<u64>,
}

/// 读取任意文件的状态，文件不存在时 exists = false
pub async fn file_info(path: &Path) -> FileInfo {
    let metadata = fs::metadata(path).await.ok();
    FileInfo {
        path: path.display().to_string(),
        exists: metadata.is_some(),
        modified: metadata
            .as_ref()
            .and_then(|m| m.modified().ok())
            .map(DateTime::<Local>::from),
        size: metadata.as_ref().map(|m| m.len()),
    }
}

/// 文件修改时间，文件不存在或平台不支持时返回 None
pub async fn modified_time(path: &Path) -> Option<DateTime<Local>> {
    let metadata = fs::metadata(path).await.ok()?;
    metadata.modified().ok().map(DateTime::<Local>::from)
}

/// 快照存储
///
/// 职责：
/// - 持有快照路径
/// - 读 / 写快照文件，写入以重命名原子替换旧文件
/// - 不认识源文档，不做过期判断
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 写入时使用的临时文件：`<快照>.tmp`
    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    pub async fn exists(&self) -> bool {
        fs::try_exists(&self.path).await.unwrap_or(false)
    }

    pub async fn info(&self) -> FileInfo {
        file_info(&self.path).await
    }

    /// 读取并校验快照
    pub async fn read(&self) -> AppResult<Snapshot> {
        let text = fs::read_to_string(&self.path)
            .await
            .map_err(|e| AppError::snapshot_read_failed(&self.path, e))?;

        let snapshot =
            Snapshot::from_json(&text).map_err(|reason| AppError::snapshot_corrupt(&self.path, reason))?;

        debug!(
            "快照读取成功: {} (版本 {}, {} 个故事)",
            self.path.display(),
            snapshot.version,
            snapshot.stories.len()
        );
        Ok(snapshot)
    }

    /// 写入快照
    ///
    /// 先写临时文件再重命名，写入失败时旧快照保持不变
    pub async fn write(&self, snapshot: &Snapshot) -> AppResult<()> {
        let json = snapshot
            .to_json()
            .map_err(|e| AppError::snapshot_write_failed(&self.path, e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::snapshot_write_failed(&self.path, e))?;
        }

        let tmp = self.tmp_path();
        if let Err(e) = fs::write(&tmp, json.as_bytes()).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(AppError::snapshot_write_failed(&self.path, e));
        }
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| AppError::snapshot_write_failed(&self.path, e))?;

        info!("💾 快照已保存: {} ({} 字节)", self.path.display(), json.len());
        Ok(())
    }
}
