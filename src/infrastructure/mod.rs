pub mod db;
pub mod queue;
pub mod realtime;
pub mod repositories;
