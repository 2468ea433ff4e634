//! User prompts shown while pairing with a mobile wallet.

use tracing::debug;

/// Callbacks the SDK invokes to display pairing prompts.
pub trait ModalHooks: Send + Sync {
    /// Show the link the user opens or scans to install or pair the wallet.
    fn install(&self, link: &str);

    /// Prepare the one-time-passcode prompt.
    fn mount_otp(&self) {}

    /// Relay a new one-time passcode. Empty values are ignored.
    fn update_otp_value(&self, otp: &str);
}

/// Format the passcode notice, or `None` for an empty passcode.
pub fn otp_notice(otp: &str) -> Option<String> {
    if otp.is_empty() {
        return None;
    }
    Some(format!(
        "[CUSTOMIZE TEXT] Choose the following value on your metamask mobile wallet: {}",
        otp
    ))
}

/// Prompts written to the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalModals;

impl ModalHooks for TerminalModals {
    fn install(&self, link: &str) {
        println!("Open this link on the device running your wallet:");
        println!("  {}", link);
    }

    fn mount_otp(&self) {
        debug!("OTP prompt mounted");
    }

    fn update_otp_value(&self, otp: &str) {
        if let Some(notice) = otp_notice(otp) {
            println!("{}", notice);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_notice() {
        assert_eq!(otp_notice(""), None);
        assert_eq!(
            otp_notice("42").unwrap(),
            "[CUSTOMIZE TEXT] Choose the following value on your metamask mobile wallet: 42"
        );
    }
}
