// ABOUTME: Per-user document store contract for logs, weight entries and profiles
// ABOUTME: Async NutritionStore trait with an in-memory tokio RwLock implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MacroLens

//! Nutrition Store
//!
//! Every record is owned by one user. Reads through another user's id behave
//! as if the record did not exist; writes over another user's record are
//! rejected. Upserts are last-write-wins.

use async_trait::async_trait;
use macrolens_core::errors::{AppError, AppResult};
use macrolens_core::models::{FoodLog, UserProfile, WeightEntry};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Per-user persistence for food logs, weight entries and profiles
#[async_trait]
pub trait NutritionStore: Send + Sync {
    /// A user's logs, newest first
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend fails
    async fn list_logs(&self, user_id: &str) -> AppResult<Vec<FoodLog>>;

    /// One of a user's logs
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user has no such record
    async fn get_log(&self, user_id: &str, log_id: &str) -> AppResult<FoodLog>;

    /// Insert or replace a log
    ///
    /// # Errors
    ///
    /// Returns `PermissionDenied` if the id belongs to another user
    async fn upsert_log(&self, log: FoodLog) -> AppResult<()>;

    /// Delete one of a user's logs
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user has no such record
    async fn delete_log(&self, user_id: &str, log_id: &str) -> AppResult<()>;

    /// A user's weight entries, oldest first
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend fails
    async fn list_weights(&self, user_id: &str) -> AppResult<Vec<WeightEntry>>;

    /// Insert or replace a weight entry
    ///
    /// # Errors
    ///
    /// Returns `PermissionDenied` if the id belongs to another user
    async fn upsert_weight(&self, entry: WeightEntry) -> AppResult<()>;

    /// A user's profile
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user has no such record
    async fn get_profile(&self, user_id: &str) -> AppResult<UserProfile>;

    /// Insert or replace a profile
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend fails
    async fn upsert_profile(&self, profile: UserProfile) -> AppResult<()>;
}

/// In-memory store for tests and the CLI
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    logs: Arc<RwLock<HashMap<String, FoodLog>>>,
    weights: Arc<RwLock<HashMap<String, WeightEntry>>>,
    profiles: Arc<RwLock<HashMap<String, UserProfile>>>,
}

impl InMemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_owner(existing_owner: Option<&str>, user_id: &str, record_id: &str) -> AppResult<()> {
    match existing_owner {
        Some(owner) if owner != user_id => Err(AppError::permission_denied(format!(
            "record {record_id} belongs to another user"
        ))
        .with_user_id(user_id)
        .with_resource_id(record_id)),
        _ => Ok(()),
    }
}

#[async_trait]
impl NutritionStore for InMemoryStore {
    async fn list_logs(&self, user_id: &str) -> AppResult<Vec<FoodLog>> {
        let logs = self.logs.read().await;
        let mut owned: Vec<FoodLog> = logs
            .values()
            .filter(|log| log.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(owned)
    }

    async fn get_log(&self, user_id: &str, log_id: &str) -> AppResult<FoodLog> {
        let logs = self.logs.read().await;
        logs.get(log_id)
            .filter(|log| log.user_id == user_id)
            .cloned()
            .ok_or_else(|| {
                AppError::not_found(format!("Food log {log_id}"))
                    .with_user_id(user_id)
                    .with_resource_id(log_id)
            })
    }

    async fn upsert_log(&self, log: FoodLog) -> AppResult<()> {
        let mut logs = self.logs.write().await;
        check_owner(
            logs.get(&log.id).map(|existing| existing.user_id.as_str()),
            &log.user_id,
            &log.id,
        )?;
        debug!(user_id = %log.user_id, log_id = %log.id, "Upserting food log");
        logs.insert(log.id.clone(), log);
        Ok(())
    }

    async fn delete_log(&self, user_id: &str, log_id: &str) -> AppResult<()> {
        let mut logs = self.logs.write().await;
        match logs.get(log_id) {
            Some(log) if log.user_id == user_id => {
                logs.remove(log_id);
                debug!(user_id, log_id, "Deleted food log");
                Ok(())
            }
            _ => Err(AppError::not_found(format!("Food log {log_id}"))
                .with_user_id(user_id)
                .with_resource_id(log_id)),
        }
    }

    async fn list_weights(&self, user_id: &str) -> AppResult<Vec<WeightEntry>> {
        let weights = self.weights.read().await;
        let mut owned: Vec<WeightEntry> = weights
            .values()
            .filter(|entry| entry.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by_key(|entry| entry.date);
        Ok(owned)
    }

    async fn upsert_weight(&self, entry: WeightEntry) -> AppResult<()> {
        let mut weights = self.weights.write().await;
        check_owner(
            weights.get(&entry.id).map(|existing| existing.user_id.as_str()),
            &entry.user_id,
            &entry.id,
        )?;
        weights.insert(entry.id.clone(), entry);
        Ok(())
    }

    async fn get_profile(&self, user_id: &str) -> AppResult<UserProfile> {
        let profiles = self.profiles.read().await;
        profiles
            .get(user_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Profile {user_id}")).with_user_id(user_id))
    }

    async fn upsert_profile(&self, profile: UserProfile) -> AppResult<()> {
        let mut profiles = self.profiles.write().await;
        profiles.insert(profile.id.clone(), profile);
        Ok(())
    }
}
