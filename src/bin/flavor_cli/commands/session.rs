// ABOUTME: Session commands for flavor-cli
// ABOUTME: Handles login, register, logout, and whoami against the persisted session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use flavor_exchange::{auth::RegistrationForm, context::AppContext, errors::AppResult};

use crate::helpers::display::display_identity;

type Result<T> = AppResult<T>;

/// Sign in with a demo account
pub async fn login(context: &AppContext, email: &str, password: &str) -> Result<()> {
    let identity = context.authenticator().authenticate(email, password)?;
    context.identity().login(identity.clone()).await?;
    display_identity(&identity);
    Ok(())
}

/// Register and sign in
pub async fn register(
    context: &AppContext,
    username: String,
    email: String,
    password: String,
    confirm_password: Option<String>,
) -> Result<()> {
    let form = RegistrationForm {
        username,
        email,
        confirm_password: confirm_password.unwrap_or_else(|| password.clone()),
        password,
    };
    let identity = context.authenticator().register(&form)?;
    context.identity().register(identity.clone()).await?;
    println!("Account created");
    display_identity(&identity);
    Ok(())
}

/// Sign out
pub async fn logout(context: &AppContext) -> Result<()> {
    let was_signed_in = context.identity().is_authenticated().await;
    context.identity().logout().await?;
    if was_signed_in {
        println!("Signed out");
    } else {
        println!("Not signed in");
    }
    Ok(())
}

/// Show the signed-in user
pub async fn whoami(context: &AppContext) -> Result<()> {
    match context.identity().current_identity().await {
        Some(identity) => display_identity(&identity),
        None => println!("Not signed in"),
    }
    Ok(())
}
