//! Application layer: the editable form state and the document repository
//! that persists it through a [`KeyValueStore`](crate::domain::ports::KeyValueStore).

pub mod form;
pub mod repository;
