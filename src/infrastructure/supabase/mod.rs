//! Supabase integration - REST client and table-backed repositories

mod client;
mod repositories;

pub use client::SupabaseClient;
pub use repositories::{
    SupabaseCategoryRepository, SupabaseClientRepository, SupabaseOrderRepository,
    SupabaseUserRepository,
};
