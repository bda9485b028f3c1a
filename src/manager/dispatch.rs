// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fire-and-forget execution of device operations.

use std::future::Future;

use tokio::task::JoinHandle;

/// Runs a device operation in the background and logs its outcome.
///
/// The result is not returned to the caller. Success is logged at `debug`,
/// failure at `warn`, both tagged with `label`. The handle can be awaited to
/// know when the operation finished, or dropped.
///
/// Must be called from within a tokio runtime.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use nanoleaf_gateway::Device;
/// use nanoleaf_gateway::manager::spawn_detached;
///
/// # async fn example(device: Arc<Device>) {
/// spawn_detached("set_brightness", async move { device.set_brightness(60).await });
/// # }
/// ```
pub fn spawn_detached<F, T>(label: &'static str, operation: F) -> JoinHandle<()>
where
    F: Future<Output = crate::Result<T>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(async move {
        match operation.await {
            Ok(_) => tracing::debug!(operation = label, "Detached operation completed"),
            Err(e) => tracing::warn!(operation = label, error = %e, "Detached operation failed"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[tokio::test]
    async fn completes_on_success() {
        let handle = spawn_detached("ok", async { Ok::<_, Error>(42) });
        assert!(handle.await.is_ok());
    }

    #[tokio::test]
    async fn swallows_failure() {
        let handle = spawn_detached("fails", async { Err::<(), _>(Error::NotConfigured) });
        assert!(handle.await.is_ok());
    }
}
