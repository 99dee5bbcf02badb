use anchor_lang::prelude::*;
use crate::{
    constants::*,
    errors::ErrorCode,
    events::{AdminTransferred, ConfigUpdated},
    state::LedgerConfig,
};

/// Epoch and day length are fixed at init: changing them would renumber days under
/// the two-generation snapshot.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Default)]
pub struct UpdateConfigArgs {
    /// Hand the config over to a new admin.
    pub admin: Option<Pubkey>,
    pub authority: Option<Pubkey>,
    pub paused: Option<bool>,
}

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_CFG],
        bump = config.bump,
        constraint = config.admin == admin.key() @ ErrorCode::Unauthorized,
    )]
    pub config: Account<'info, LedgerConfig>,
}

/// Validate every field before writing any. Returns the previous admin on handover.
fn apply_args(cfg: &mut LedgerConfig, args: &UpdateConfigArgs) -> Result<Option<Pubkey>> {
    if let Some(admin) = args.admin {
        require!(
            admin != Pubkey::default() && admin != cfg.admin,
            ErrorCode::InvalidAdmin
        );
    }
    if let Some(authority) = args.authority {
        require!(authority != Pubkey::default(), ErrorCode::InvalidAuthority);
        cfg.authority = authority;
    }
    if let Some(paused) = args.paused {
        cfg.paused = paused;
    }
    Ok(args
        .admin
        .map(|admin| std::mem::replace(&mut cfg.admin, admin)))
}

pub fn handler(ctx: Context<UpdateConfig>, args: UpdateConfigArgs) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    let previous_admin = apply_args(cfg, &args)?;

    if let Some(old_admin) = previous_admin {
        emit!(AdminTransferred {
            old_admin,
            new_admin: cfg.admin,
        });
    }
    emit!(ConfigUpdated {
        authority: cfg.authority,
        paused: cfg.paused,
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LedgerConfig {
        LedgerConfig {
            admin: Pubkey::new_unique(),
            authority: Pubkey::new_unique(),
            ..Default::default()
        }
    }

    #[test]
    fn handover_replaces_admin_and_reports_the_old_one() {
        let mut cfg = config();
        let old = cfg.admin;
        let new = Pubkey::new_unique();

        let args = UpdateConfigArgs {
            admin: Some(new),
            ..Default::default()
        };
        let previous = apply_args(&mut cfg, &args).unwrap();

        assert_eq!(previous, Some(old));
        assert_eq!(cfg.admin, new);
    }

    #[test]
    fn handover_to_null_or_same_admin_is_refused() {
        let mut cfg = config();
        let admin = cfg.admin;

        for bad in [Pubkey::default(), admin] {
            let args = UpdateConfigArgs {
                admin: Some(bad),
                paused: Some(true),
                ..Default::default()
            };
            assert!(apply_args(&mut cfg, &args).is_err());
        }
        assert_eq!(cfg.admin, admin);
        assert!(!cfg.paused);
    }

    #[test]
    fn authority_and_pause_update_without_touching_admin() {
        let mut cfg = config();
        let admin = cfg.admin;
        let authority = Pubkey::new_unique();

        let previous = apply_args(
            &mut cfg,
            &UpdateConfigArgs { authority: Some(authority), paused: Some(true), ..Default::default() },
        )
        .unwrap();

        assert_eq!(previous, None);
        assert_eq!(cfg.admin, admin);
        assert_eq!(cfg.authority, authority);
        assert!(cfg.paused);
        assert!(apply_args(
            &mut cfg,
            &UpdateConfigArgs { authority: Some(Pubkey::default()), ..Default::default() },
        )
        .is_err());
    }
}
