//! Static concept and ability catalog.

use super::types::{Ability, AbilityEffect, Concept, ConceptCategory};
use crate::combat::types::EnemyKind;

/// Innate attack every player has, with no backing concept.
pub const BASIC_ATTACK_ID: &str = "basic_attack";

/// All concepts in lesson order.
pub const ALL_CONCEPTS: &[Concept] = &[
    Concept {
        id: "ec2_basics",
        name: "EC2 Basics",
        category: ConceptCategory::Compute,
        description: "Virtual servers, instance types and Auto Scaling",
        prerequisites: &[],
        ability_id: "auto_scaling",
    },
    Concept {
        id: "lambda_serverless",
        name: "AWS Lambda & Serverless",
        category: ConceptCategory::Compute,
        description: "Event-driven functions without managing servers",
        prerequisites: &["ec2_basics"],
        ability_id: "serverless_strike",
    },
    Concept {
        id: "s3_storage",
        name: "Amazon S3 Storage",
        category: ConceptCategory::Storage,
        description: "Durable object storage, versioning and lifecycle rules",
        prerequisites: &[],
        ability_id: "data_backup",
    },
    Concept {
        id: "vpc_networking",
        name: "VPC Networking",
        category: ConceptCategory::Networking,
        description: "Subnets, route tables and security groups",
        prerequisites: &[],
        ability_id: "network_isolation",
    },
    Concept {
        id: "iam_security",
        name: "IAM Security",
        category: ConceptCategory::Security,
        description: "Users, roles, policies and least privilege",
        prerequisites: &[],
        ability_id: "access_control",
    },
];

/// All abilities, innate first.
pub const ALL_ABILITIES: &[Ability] = &[
    Ability {
        id: BASIC_ATTACK_ID,
        name: "Basic Attack",
        concept_id: None,
        base_power: 15,
        cooldown: 0,
        counters: &[],
        effect: AbilityEffect::None,
    },
    Ability {
        id: "auto_scaling",
        name: "Auto Scaling",
        concept_id: Some("ec2_basics"),
        base_power: 25,
        cooldown: 2,
        counters: &[EnemyKind::CostOverrun],
        effect: AbilityEffect::Shield(10),
    },
    Ability {
        id: "serverless_strike",
        name: "Serverless Strike",
        concept_id: Some("lambda_serverless"),
        base_power: 30,
        cooldown: 0,
        counters: &[EnemyKind::LatencyMonster],
        effect: AbilityEffect::None,
    },
    Ability {
        id: "data_backup",
        name: "Data Backup",
        concept_id: Some("s3_storage"),
        base_power: 20,
        cooldown: 3,
        counters: &[EnemyKind::DataLossDemon],
        effect: AbilityEffect::Heal(15),
    },
    Ability {
        id: "network_isolation",
        name: "Network Isolation",
        concept_id: Some("vpc_networking"),
        base_power: 15,
        cooldown: 2,
        counters: &[EnemyKind::LatencyMonster, EnemyKind::SecurityBreach],
        effect: AbilityEffect::Weaken { percent: 30 },
    },
    Ability {
        id: "access_control",
        name: "Access Control",
        concept_id: Some("iam_security"),
        base_power: 35,
        cooldown: 3,
        counters: &[EnemyKind::SecurityBreach],
        effect: AbilityEffect::None,
    },
];
