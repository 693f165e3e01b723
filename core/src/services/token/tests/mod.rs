//! Token service tests and shared fixtures

mod service_tests;

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::clock::{Clock, ManualClock};
use crate::domain::entities::user::{NewUser, User};
use crate::repositories::{InMemoryRevocationRepository, InMemoryUserRepository, UserRepository};
use crate::services::token::{TokenService, TokenServiceConfig};

pub(super) const TEST_SECRET: &str = "test-secret-for-token-service";

pub(super) struct Fixture {
    pub service: TokenService<InMemoryRevocationRepository, InMemoryUserRepository>,
    pub users: Arc<InMemoryUserRepository>,
    pub revocations: Arc<InMemoryRevocationRepository>,
    pub clock: ManualClock,
    pub user: User,
}

impl Fixture {
    pub fn clock_now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}

pub(super) fn test_config() -> TokenServiceConfig {
    TokenServiceConfig {
        jwt_secret: TEST_SECRET.to_string(),
        access_token_expiry_minutes: 5,
        refresh_token_expiry_minutes: 60,
    }
}

pub(super) async fn fixture() -> Fixture {
    fixture_with_config(test_config()).await
}

pub(super) async fn fixture_with_config(config: TokenServiceConfig) -> Fixture {
    let users = Arc::new(InMemoryUserRepository::new());
    let revocations = Arc::new(InMemoryRevocationRepository::new());
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());

    let user = users
        .create(NewUser {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "a@b.com".to_string(),
            password_hash: "digest".to_string(),
        })
        .await
        .unwrap();

    let service = TokenService::with_clock(
        revocations.clone(),
        users.clone(),
        config,
        Arc::new(clock.clone()),
    )
    .unwrap();

    Fixture {
        service,
        users,
        revocations,
        clock,
        user,
    }
}
