// Game action definitions and the per-tick intent snapshot

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    /// Primary attack
    Attack,
}

/// Snapshot of what the player wants to do this tick.
///
/// Built by the host from its own key handling; the core never sees raw
/// input events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntentFlags {
    pub move_left: bool,
    pub move_right: bool,
    pub jump_pressed: bool,
    pub action_pressed: bool,
}

impl IntentFlags {
    /// No input at all
    pub const IDLE: Self = Self {
        move_left: false,
        move_right: false,
        jump_pressed: false,
        action_pressed: false,
    };

    /// Collect the flags for a set of held actions
    pub fn from_actions<I>(actions: I) -> Self
    where
        I: IntoIterator<Item = Action>,
    {
        let mut flags = Self::IDLE;
        for action in actions {
            flags.set(action, true);
        }
        flags
    }

    /// Set or clear the flag for one action
    pub fn set(&mut self, action: Action, held: bool) {
        match action {
            Action::MoveLeft => self.move_left = held,
            Action::MoveRight => self.move_right = held,
            Action::Jump => self.jump_pressed = held,
            Action::Attack => self.action_pressed = held,
        }
    }

    /// Horizontal direction: -1 left, 1 right, 0 for none or both
    pub fn horizontal(&self) -> f32 {
        match (self.move_left, self.move_right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    pub fn wants_to_move(&self) -> bool {
        self.horizontal() != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_equality() {
        assert_eq!(Action::Jump, Action::Jump);
        assert_ne!(Action::Jump, Action::Attack);
    }

    #[test]
    fn test_from_actions() {
        let flags = IntentFlags::from_actions([Action::MoveLeft, Action::Attack]);
        assert!(flags.move_left);
        assert!(flags.action_pressed);
        assert!(!flags.move_right);
        assert!(!flags.jump_pressed);
    }

    #[test]
    fn test_horizontal_direction() {
        assert_eq!(IntentFlags::from_actions([Action::MoveLeft]).horizontal(), -1.0);
        assert_eq!(IntentFlags::from_actions([Action::MoveRight]).horizontal(), 1.0);
        // Opposing directions cancel out
        let both = IntentFlags::from_actions([Action::MoveLeft, Action::MoveRight]);
        assert_eq!(both.horizontal(), 0.0);
        assert!(!both.wants_to_move());
        assert!(!IntentFlags::IDLE.wants_to_move());
    }

    #[test]
    fn test_set_and_release() {
        let mut flags = IntentFlags::IDLE;
        flags.set(Action::Jump, true);
        assert!(flags.jump_pressed);
        flags.set(Action::Jump, false);
        assert_eq!(flags, IntentFlags::IDLE);
    }
}
