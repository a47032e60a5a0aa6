pub mod redis_enqueuer;
