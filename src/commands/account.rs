use anyhow::{Result, bail};
use clap::Args;

use fnb_storefront::{
    api,
    dto::auth::{LoginRequest, RegisterRequest, UpdateProfileRequest},
    format::uppercase_first_letter,
};

use super::Context;

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Phone number or email
    pub identity: String,
    #[arg(long)]
    pub password: String,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub confirm_password: String,
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub avatar_url: Option<String>,
}

pub async fn login(ctx: &Context, args: LoginArgs) -> Result<()> {
    let payload = LoginRequest {
        phone_num_or_email: args.identity.trim().to_string(),
        password: args.password,
    };
    let resp = match api::auth::login(&ctx.api, &payload).await {
        Ok(resp) => resp,
        Err(err) => bail!(err.user_message("Login failed")),
    };
    let mut session = ctx.session().await?;
    session.set_token_and_user(&resp.token, resp.user).await?;
    if let Some(user) = session.current_user() {
        println!("Welcome back, {}!", user.full_name());
    }
    Ok(())
}

pub async fn register(ctx: &Context, args: RegisterArgs) -> Result<()> {
    if args.password != args.confirm_password {
        bail!("Passwords do not match.");
    }
    let payload = RegisterRequest {
        phone_num: args.phone,
        email: args.email,
        password: args.password,
        first_name: args.first_name,
        last_name: args.last_name,
    };
    let resp = match api::auth::register(&ctx.api, &payload).await {
        Ok(resp) => resp,
        Err(err) => bail!(err.user_message("Unable to create account. Please try again.")),
    };
    let mut session = ctx.session().await?;
    session.set_token_and_user(&resp.token, resp.user).await?;
    println!("Your account has been created!");
    Ok(())
}

pub async fn logout(ctx: &Context) -> Result<()> {
    let mut session = ctx.session().await?;
    session.clear().await?;
    println!("Logged out.");
    Ok(())
}

pub async fn whoami(ctx: &Context) -> Result<()> {
    let session = ctx.session().await?;
    match session.current_user() {
        Some(user) => {
            println!("{} <{}>", user.full_name(), user.email.as_deref().unwrap_or("-"));
            println!("  Phone: {}", user.phone_num);
            println!("  Role:  {}", uppercase_first_letter(user.role.as_str()));
            if let Some(code) = &user.staff_of_store_code {
                println!("  Store: {code}");
            }
        }
        None => println!("Not logged in."),
    }
    Ok(())
}

/// Updates the profile, then refreshes the cached user from the server.
pub async fn profile(ctx: &Context, args: ProfileArgs) -> Result<()> {
    let (token, user) = ctx.require_login().await?;
    let payload = UpdateProfileRequest {
        first_name: args.first_name,
        last_name: args.last_name,
        avt_url: args.avatar_url,
    };
    if let Err(err) = api::users::update_profile(&ctx.api, &token, &user.id, &payload).await {
        bail!(err.user_message("Update user profile failed"));
    }
    let refreshed = api::users::fetch_current_user(&ctx.api, &token).await?;
    let mut session = ctx.session().await?;
    session.update_user(refreshed).await?;
    println!("Update user profile successfully");
    Ok(())
}
