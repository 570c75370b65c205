pub mod id;
pub mod task_ops;
