use crate::domain::shared::lock::{DistributedLock, LockError, LockToken};
use async_trait::async_trait;
use redis::{Client, Script};
use tracing::{debug, warn};
use uuid::Uuid;

/// Release is a compare-and-delete: only remove the key if its value still
/// matches the token we think we hold. Doing this as a Lua script makes the
/// GET+DEL atomic against a concurrent acquirer.
const RELEASE_SCRIPT: &str = r#"
if redis.call("GET", KEYS[1]) == ARGV[1] then
    return redis.call("DEL", KEYS[1])
else
    return 0
end
"#;

/// Distributed lock backed by Redis `SET key token NX EX ttl`.
pub struct RedisDistributedLock {
    client: Client,
}

impl RedisDistributedLock {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DistributedLock for RedisDistributedLock {
    async fn acquire(&self, key: &str, ttl_seconds: u64) -> Result<Option<LockToken>, LockError> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| LockError::Unavailable(e.to_string()))?;

        let token = Uuid::new_v4().to_string();
        let acquired: bool = redis::cmd("SET")
            .arg(key)
            .arg(&token)
            .arg("NX")
            .arg("EX")
            .arg(ttl_seconds)
            .query_async::<Option<String>>(&mut conn)
            .await
            .map_err(|e| LockError::Unavailable(e.to_string()))?
            .is_some();

        if acquired {
            debug!(key, "distributed lock acquired");
            Ok(Some(LockToken(token)))
        } else {
            debug!(key, "distributed lock already held");
            Ok(None)
        }
    }

    async fn release(&self, key: &str, token: &LockToken) -> Result<(), LockError> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| LockError::Unavailable(e.to_string()))?;

        let script = Script::new(RELEASE_SCRIPT);
        let result: i64 = script
            .key(key)
            .arg(&token.0)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| LockError::Unavailable(e.to_string()))?;

        if result == 0 {
            warn!(key, "lock release was a no-op (already expired or stolen)");
        }
        Ok(())
    }
}
