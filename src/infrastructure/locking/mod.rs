pub mod redis_lock;
