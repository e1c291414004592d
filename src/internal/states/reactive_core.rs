//! # ReactiveProperty
//!
//! 基于 [`tokio::sync::watch`] 的响应式属性：写入方 `update`，任意多个监听者 `watch()` 后
//! `changed().await` 拿到最新值。下载器用它对外发布每一份进度报告。
//!
//! 读写都不阻塞，监听者只会看到最新值，错过的中间值不会补发，适合高频的进度刷新。

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tokio::sync::watch::error::RecvError;

/// 响应式属性错误
#[derive(Debug, Error)]
pub enum ReactivePropertyError {
    /// 属性已被销毁，不会再有新值
    #[error("属性已被销毁")]
    WatcherClosed,

    #[error("接收失败: {0}")]
    RecvError(#[from] RecvError),
}

/// 共享发送器。最后一个句柄销毁时发出 `None`，唤醒所有监听者。
#[derive(Debug)]
struct Inner<T> {
    sender: watch::Sender<Option<T>>,
}

impl<T> Drop for Inner<T> {
    fn drop(&mut self) {
        let _ = self.sender.send(None);
    }
}

/// 响应式属性；`Clone` 得到的是同一份状态的另一个句柄。
#[derive(Clone, Debug)]
pub struct ReactiveProperty<T: Clone + Send + Sync> {
    inner: Arc<Inner<T>>,
    cache_receiver: watch::Receiver<Option<T>>,
}

impl<T> ReactiveProperty<T>
where
    T: Clone + Send + Sync,
{
    pub fn new(value: T) -> Self {
        let (sender, cache_receiver) = watch::channel(Some(value));
        Self {
            inner: Arc::new(Inner { sender }),
            cache_receiver,
        }
    }

    /// 写入新值并通知所有监听者。
    pub fn update(&self, new_value: T) -> &Self {
        // 没有监听者时 send 会失败，send_replace 仍会写入
        self.inner.sender.send_replace(Some(new_value));
        self
    }

    /// 当前值的快照（会 clone）。
    pub fn get_current(&self) -> Option<T> {
        self.cache_receiver.borrow().as_ref().cloned()
    }

    /// 创建监听器。只会收到创建之后写入的值。
    pub fn watch(&self) -> PropertyWatcher<T> {
        PropertyWatcher {
            receiver: self.inner.sender.subscribe(),
        }
    }
}

/// 属性监听器。不持有属性本身，所有属性句柄销毁后 `changed` 返回错误。
pub struct PropertyWatcher<T> {
    receiver: watch::Receiver<Option<T>>,
}

impl<T> PropertyWatcher<T>
where
    T: Clone + Send + Sync,
{
    /// 等待下一次变化并返回新值。
    pub async fn changed(&mut self) -> Result<T, ReactivePropertyError> {
        self.receiver.changed().await?;
        match self.receiver.borrow_and_update().as_ref() {
            None => Err(ReactivePropertyError::WatcherClosed),
            Some(value) => Ok(value.clone()),
        }
    }

    /// 同步读取当前值。
    pub fn borrow(&self) -> Option<T> {
        self.receiver.borrow().clone()
    }
}
