use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Closed set of enemy kinds. Each is themed on a cloud failure mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    LatencyMonster,
    SecurityBreach,
    DataLossDemon,
    CostOverrun,
    CloudBug,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 5] = [
        EnemyKind::LatencyMonster,
        EnemyKind::SecurityBreach,
        EnemyKind::DataLossDemon,
        EnemyKind::CostOverrun,
        EnemyKind::CloudBug,
    ];

    /// Stable string tag used in saves and statistics.
    pub fn tag(&self) -> &'static str {
        match self {
            EnemyKind::LatencyMonster => "latency_monster",
            EnemyKind::SecurityBreach => "security_breach",
            EnemyKind::DataLossDemon => "data_loss_demon",
            EnemyKind::CostOverrun => "cost_overrun",
            EnemyKind::CloudBug => "cloud_bug",
        }
    }

    pub fn from_tag(tag: &str) -> Option<EnemyKind> {
        EnemyKind::ALL.into_iter().find(|k| k.tag() == tag)
    }

    pub fn template(&self) -> &'static EnemyTemplate {
        match self {
            EnemyKind::LatencyMonster => &ENEMY_TEMPLATES[0],
            EnemyKind::SecurityBreach => &ENEMY_TEMPLATES[1],
            EnemyKind::DataLossDemon => &ENEMY_TEMPLATES[2],
            EnemyKind::CostOverrun => &ENEMY_TEMPLATES[3],
            EnemyKind::CloudBug => &ENEMY_TEMPLATES[4],
        }
    }
}

/// One entry of an enemy's attack pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackStep {
    Strike(u32),
    /// Winds up; deals no damage this turn.
    Idle,
}

/// Static stats an enemy spawns with.
#[derive(Debug)]
pub struct EnemyTemplate {
    pub kind: EnemyKind,
    pub name: &'static str,
    pub max_health: u32,
    pub weakness: Option<&'static str>,
    pub pattern: &'static [AttackStep],
}

pub static ENEMY_TEMPLATES: [EnemyTemplate; 5] = [
    EnemyTemplate {
        kind: EnemyKind::LatencyMonster,
        name: "Latency Monster",
        max_health: 80,
        weakness: Some("vpc_networking"),
        pattern: &[AttackStep::Strike(15), AttackStep::Strike(15), AttackStep::Idle],
    },
    EnemyTemplate {
        kind: EnemyKind::SecurityBreach,
        name: "Security Breach",
        max_health: 120,
        weakness: Some("iam_security"),
        pattern: &[AttackStep::Strike(25), AttackStep::Idle],
    },
    EnemyTemplate {
        kind: EnemyKind::DataLossDemon,
        name: "Data Loss Demon",
        max_health: 100,
        weakness: Some("s3_storage"),
        pattern: &[AttackStep::Idle, AttackStep::Strike(30)],
    },
    EnemyTemplate {
        kind: EnemyKind::CostOverrun,
        name: "Cost Overrun",
        max_health: 150,
        weakness: Some("lambda_serverless"),
        pattern: &[
            AttackStep::Strike(10),
            AttackStep::Strike(20),
            AttackStep::Strike(30),
        ],
    },
    EnemyTemplate {
        kind: EnemyKind::CloudBug,
        name: "Cloud Bug",
        max_health: 60,
        weakness: None,
        pattern: &[AttackStep::Strike(10)],
    },
];

/// An enemy inside one encounter. Not persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    /// Unique within the encounter; the UI targets enemies by this id.
    pub id: u32,
    pub kind: EnemyKind,
    pub name: String,
    pub health: u32,
    pub max_health: u32,
    pub weakness: Option<&'static str>,
    pub pattern: Vec<AttackStep>,
    pattern_index: usize,
    pending_weaken: Option<u32>,
}

impl Enemy {
    pub fn new(
        id: u32,
        kind: EnemyKind,
        max_health: u32,
        weakness: Option<&'static str>,
        pattern: Vec<AttackStep>,
    ) -> Self {
        Self {
            id,
            kind,
            name: kind.template().name.to_string(),
            health: max_health,
            max_health,
            weakness,
            pattern,
            pattern_index: 0,
            pending_weaken: None,
        }
    }

    /// Spawns an enemy with its kind's template stats.
    pub fn spawn(kind: EnemyKind, id: u32) -> Self {
        let template = kind.template();
        Self::new(
            id,
            kind,
            template.max_health,
            template.weakness,
            template.pattern.to_vec(),
        )
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Applies damage, clamping at zero. Returns the damage actually taken.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.health);
        self.health -= taken;
        taken
    }

    pub fn health_percent(&self) -> u32 {
        if self.max_health == 0 {
            return 0;
        }
        ((self.health as u64 * 100) / self.max_health as u64) as u32
    }

    /// Queues a reduction of the next strike. A stronger debuff replaces a weaker one.
    pub fn apply_weaken(&mut self, percent: u32) {
        let percent = percent.min(100);
        self.pending_weaken = Some(self.pending_weaken.map_or(percent, |p| p.max(percent)));
    }

    pub fn pending_weaken(&self) -> Option<u32> {
        self.pending_weaken
    }

    /// Returns the next pattern entry and advances, wrapping after the last.
    pub fn next_step(&mut self) -> AttackStep {
        if self.pattern.is_empty() {
            return AttackStep::Idle;
        }
        let step = self.pattern[self.pattern_index % self.pattern.len()];
        self.pattern_index = (self.pattern_index + 1) % self.pattern.len();
        step
    }

    /// Damage of a strike after any pending weaken, which the strike consumes.
    pub fn strike_damage(&mut self, base: u32) -> u32 {
        match self.pending_weaken.take() {
            Some(percent) => base - (base as u64 * percent.min(100) as u64 / 100) as u32,
            None => base,
        }
    }
}

/// Remaining cooldown turns per ability id. Abilities with no entry are ready.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CooldownTable(BTreeMap<String, u32>);

impl CooldownTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remaining(&self, ability_id: &str) -> u32 {
        self.0.get(ability_id).copied().unwrap_or(0)
    }

    pub fn is_ready(&self, ability_id: &str) -> bool {
        self.remaining(ability_id) == 0
    }

    /// Stores the cooldown of the ability just used and ticks every other
    /// ability down by one turn.
    pub fn commit(&mut self, used_id: &str, new_cooldown: u32) {
        self.0.retain(|id, turns| {
            if id.as_str() != used_id {
                *turns = turns.saturating_sub(1);
            }
            *turns > 0
        });
        if new_cooldown > 0 {
            self.0.insert(used_id.to_string(), new_cooldown);
        } else {
            self.0.remove(used_id);
        }
    }

    pub fn set(&mut self, ability_id: impl Into<String>, turns: u32) {
        let ability_id = ability_id.into();
        if turns == 0 {
            self.0.remove(&ability_id);
        } else {
            self.0.insert(ability_id, turns);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(id, turns)| (id.as_str(), *turns))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The player's combat vitals and cooldowns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub health: u32,
    pub max_health: u32,
    pub cooldowns: CooldownTable,
}

impl PlayerState {
    pub fn new(max_health: u32) -> Self {
        Self {
            health: max_health,
            max_health,
            cooldowns: CooldownTable::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Applies damage, clamping at zero. Returns the damage actually taken.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.health);
        self.health -= taken;
        taken
    }

    /// Restores health up to max. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_health - self.health.min(self.max_health));
        self.health += restored;
        restored
    }

    pub fn heal_full(&mut self) {
        self.health = self.max_health;
    }

    pub fn health_percent(&self) -> u32 {
        if self.max_health == 0 {
            return 0;
        }
        ((self.health as u64 * 100) / self.max_health as u64) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_kind_tags_round_trip() {
        for kind in EnemyKind::ALL {
            assert_eq!(EnemyKind::from_tag(kind.tag()), Some(kind));
            assert_eq!(kind.template().kind, kind);
        }
        assert_eq!(EnemyKind::from_tag("dragon"), None);
    }

    #[test]
    fn test_spawn_uses_template() {
        let enemy = Enemy::spawn(EnemyKind::SecurityBreach, 3);
        assert_eq!(enemy.id, 3);
        assert_eq!(enemy.health, 120);
        assert_eq!(enemy.max_health, 120);
        assert_eq!(enemy.weakness, Some("iam_security"));
        assert_eq!(enemy.name, "Security Breach");
    }

    #[test]
    fn test_enemy_damage_clamps_at_zero() {
        let mut enemy = Enemy::new(1, EnemyKind::CloudBug, 30, None, vec![]);
        assert_eq!(enemy.take_damage(40), 30);
        assert_eq!(enemy.health, 0);
        assert!(!enemy.is_alive());
    }

    #[test]
    fn test_attack_pattern_wraps() {
        let mut enemy = Enemy::spawn(EnemyKind::LatencyMonster, 1);
        let steps: Vec<_> = (0..4).map(|_| enemy.next_step()).collect();
        assert_eq!(
            steps,
            vec![
                AttackStep::Strike(15),
                AttackStep::Strike(15),
                AttackStep::Idle,
                AttackStep::Strike(15)
            ]
        );
    }

    #[test]
    fn test_empty_pattern_idles() {
        let mut enemy = Enemy::new(1, EnemyKind::CloudBug, 10, None, vec![]);
        assert_eq!(enemy.next_step(), AttackStep::Idle);
    }

    #[test]
    fn test_weaken_consumed_by_one_strike() {
        let mut enemy = Enemy::spawn(EnemyKind::SecurityBreach, 1);
        enemy.apply_weaken(30);
        enemy.apply_weaken(20);
        assert_eq!(enemy.pending_weaken(), Some(30));
        assert_eq!(enemy.strike_damage(20), 14);
        assert_eq!(enemy.strike_damage(20), 20);
    }

    #[test]
    fn test_cooldown_commit_resets_used_and_ticks_others() {
        let mut table = CooldownTable::new();
        table.set("data_backup", 3);
        table.set("auto_scaling", 1);

        table.commit("access_control", 3);

        assert_eq!(table.remaining("access_control"), 3);
        assert_eq!(table.remaining("data_backup"), 2);
        assert_eq!(table.remaining("auto_scaling"), 0);
        assert!(table.is_ready("auto_scaling"));
    }

    #[test]
    fn test_cooldown_commit_zero_cooldown_stays_ready() {
        let mut table = CooldownTable::new();
        table.commit("serverless_strike", 0);
        assert!(table.is_ready("serverless_strike"));
        assert!(table.is_empty());
    }

    #[test]
    fn test_player_heal_clamps_at_max() {
        let mut player = PlayerState::new(100);
        player.take_damage(10);
        assert_eq!(player.heal(15), 10);
        assert_eq!(player.health, 100);
    }

    #[test]
    fn test_player_damage_clamps_at_zero() {
        let mut player = PlayerState::new(10);
        assert_eq!(player.take_damage(12), 10);
        assert_eq!(player.health, 0);
        assert!(!player.is_alive());
    }
}
