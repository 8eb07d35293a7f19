//! HUD counters: score, lives and the status banner

use glam::Vec2;

use crate::consts::*;

/// A "+n" label that floats up from where points were earned
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingIndicator {
    pub value: u32,
    pub pos: Vec2,
    /// Seconds left before removal
    pub life: f32,
    pub alpha: f32,
}

/// Score with a displayed value that counts up toward the real one
#[derive(Debug, Clone, Default)]
pub struct Score {
    displayed: u32,
    target: u32,
    timer: f32,
    pub indicators: Vec<FloatingIndicator>,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value shown on the HUD
    pub fn displayed(&self) -> u32 {
        self.displayed
    }

    /// Value actually earned
    pub fn target(&self) -> u32 {
        self.target
    }

    /// Award points and spawn an indicator at `at`
    pub fn add_score(&mut self, amount: u32, at: Vec2) {
        self.target = self.target.saturating_add(amount);
        self.indicators.push(FloatingIndicator {
            value: amount,
            pos: at,
            life: INDICATOR_LIFE,
            alpha: 1.0,
        });
    }

    pub fn update(&mut self, dt: f32) {
        if self.displayed < self.target {
            self.timer += dt;
            while self.timer >= SCORE_DELAY && self.displayed < self.target {
                self.timer -= SCORE_DELAY;
                self.displayed += 1;
            }
        }
        if self.displayed >= self.target {
            self.timer = 0.0;
        }

        for indicator in &mut self.indicators {
            indicator.life -= dt;
            indicator.alpha = (indicator.life / INDICATOR_LIFE).clamp(0.0, 1.0);
            indicator.pos.y -= INDICATOR_RISE_SPEED * dt;
        }
        self.indicators.retain(|i| i.life > 0.0);
    }
}

/// Remaining lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lives {
    count: u32,
}

impl Default for Lives {
    fn default() -> Self {
        Self::new(START_LIVES)
    }
}

impl Lives {
    pub fn new(count: u32) -> Self {
        Self { count }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn has_lives(&self) -> bool {
        self.count > 0
    }

    /// Lose a life. Returns true when this call used up the last one.
    pub fn lose_life(&mut self) -> bool {
        if self.count == 0 {
            return false;
        }
        self.count -= 1;
        self.count == 0
    }

    pub fn gain_life(&mut self) {
        self.count = self.count.saturating_add(1);
    }
}

/// Centre-screen banner that holds, then fades out
#[derive(Debug, Clone, Default)]
pub struct StatusText {
    text: String,
    alpha: f32,
    hold: f32,
    fade_timer: f32,
}

impl StatusText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, text: impl Into<String>, hold: f32) {
        self.text = text.into();
        self.alpha = 1.0;
        self.hold = hold;
        self.fade_timer = 0.0;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_visible(&self) -> bool {
        self.alpha > 0.0 && !self.text.is_empty()
    }

    pub fn update(&mut self, dt: f32) {
        if self.alpha <= 0.0 {
            return;
        }
        if self.hold > 0.0 {
            self.hold -= dt;
            if self.hold > 0.0 {
                return;
            }
            // Carry the overshoot into the fade
            self.fade_timer = -self.hold;
            self.hold = 0.0;
        } else {
            self.fade_timer += dt;
        }
        while self.fade_timer >= TEXT_FADE_DELAY && self.alpha > 0.0 {
            self.fade_timer -= TEXT_FADE_DELAY;
            self.alpha = (self.alpha - TEXT_ALPHA_FADE_AMOUNT).max(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_score_counts_up_slowly() {
        let mut score = Score::new();
        score.add_score(10, Vec2::ZERO);
        assert_eq!(score.target(), 10);
        assert_eq!(score.displayed(), 0);

        score.update(SCORE_DELAY * 3.5);
        assert_eq!(score.displayed(), 3);

        score.update(10.0);
        assert_eq!(score.displayed(), 10);
    }

    #[test]
    fn test_score_timer_does_not_bank_while_idle() {
        let mut score = Score::new();
        score.update(5.0);
        score.add_score(5, Vec2::ZERO);
        score.update(SCORE_DELAY * 0.5);
        assert_eq!(score.displayed(), 0);
    }

    #[test]
    fn test_indicator_rises_fades_and_expires() {
        let mut score = Score::new();
        score.add_score(20, Vec2::new(100.0, 200.0));
        assert_eq!(score.indicators.len(), 1);

        score.update(INDICATOR_LIFE / 2.0);
        let indicator = &score.indicators[0];
        assert!((indicator.alpha - 0.5).abs() < 1e-4);
        assert!(indicator.pos.y < 200.0);
        assert_eq!(indicator.value, 20);

        score.update(INDICATOR_LIFE);
        assert!(score.indicators.is_empty());
    }

    #[test]
    fn test_lives_floor_at_zero() {
        let mut lives = Lives::new(2);
        assert!(!lives.lose_life());
        assert!(lives.lose_life());
        assert!(!lives.has_lives());
        assert!(!lives.lose_life());
        assert_eq!(lives.count(), 0);
    }

    #[test]
    fn test_gain_then_lose_is_noop() {
        let mut lives = Lives::new(3);
        lives.gain_life();
        lives.lose_life();
        assert_eq!(lives.count(), 3);
    }

    #[test]
    fn test_status_text_holds_then_fades() {
        let mut status = StatusText::new();
        status.set_text("LEVEL 1", LEVEL_TEXT_TIME);
        status.update(1.0);
        assert_eq!(status.alpha(), 1.0);
        assert!(status.is_visible());

        status.update(0.5 + TEXT_FADE_DELAY * 10.5);
        assert!(status.alpha() < 1.0 && status.alpha() > 0.8);

        status.update(5.0);
        assert_eq!(status.alpha(), 0.0);
        assert!(!status.is_visible());
    }

    proptest! {
        #[test]
        fn prop_displayed_score_never_passes_target(
            events in prop::collection::vec((0u32..50, 0.0f32..0.3), 1..100),
        ) {
            let mut score = Score::new();
            let mut last = 0;
            for (award, dt) in events {
                if award % 3 == 0 {
                    score.add_score(award, Vec2::ZERO);
                }
                score.update(dt);
                prop_assert!(score.displayed() >= last);
                prop_assert!(score.displayed() <= score.target());
                last = score.displayed();
            }
            let remaining = (score.target() - score.displayed()) as f32;
            score.update(remaining * SCORE_DELAY + 1.0);
            prop_assert_eq!(score.displayed(), score.target());
        }
    }
}
