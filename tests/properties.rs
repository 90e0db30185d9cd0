//! Property tests for clamping, speed conservation and cascade termination

use std::collections::HashSet;

use brickfall::Tuning;
use brickfall::sim::{
    BallSimulator, BrickField, BrickId, GameSession, HitOutcome, LevelConfig, Paddle, TickInput,
};
use glam::Vec2;
use proptest::prelude::*;

fn level(layout: Vec<Vec<u8>>) -> LevelConfig {
    LevelConfig {
        id: 1,
        name: "prop".to_string(),
        layout,
        speed_multiplier: 1.0,
    }
}

fn layout_strategy() -> impl Strategy<Value = Vec<Vec<u8>>> {
    // Weighted towards explosives so cascades are common
    let code = prop_oneof![
        2 => Just(0u8),
        3 => 1u8..=5,
        1 => Just(8u8),
        3 => Just(9u8),
    ];
    prop::collection::vec(prop::collection::vec(code, 10), 1..=6)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn paddle_stays_inside_the_field(
        targets in prop::collection::vec(-2000.0f32..2000.0, 1..50),
        grows in 0u32..4,
    ) {
        let tuning = Tuning::default();
        let mut paddle = Paddle::new(&tuning);
        for _ in 0..grows {
            paddle.grow(tuning.extend_increment);
        }
        for target in targets {
            paddle.set_target_x(target);
            prop_assert!(paddle.x >= 0.0);
            prop_assert!(paddle.x + paddle.width <= tuning.field_width + 0.001);
            prop_assert!(paddle.width <= tuning.paddle_max_width);
        }
    }

    #[test]
    fn bounces_preserve_speed(
        x in 20.0f32..780.0,
        y in 20.0f32..400.0,
        angle in 0.0f32..std::f32::consts::TAU,
        speed in 2.0f32..12.0,
    ) {
        let tuning = Tuning::default();
        let paddle = Paddle::new(&tuning);
        let mut bricks = BrickField::from_level(&level(vec![vec![1; 10]; 3]), &tuning);
        let mut sim = BallSimulator::new(&tuning, 1.0, &paddle);
        {
            let ball = &mut sim.balls_mut()[0];
            ball.pos = Vec2::new(x, y);
            ball.vel = Vec2::new(angle.cos(), angle.sin()) * speed;
            ball.speed = speed;
            ball.active = true;
        }

        for _ in 0..200 {
            sim.step(&paddle, &mut bricks);
            let Some(ball) = sim.balls().first() else { break };
            prop_assert!((ball.vel.length() - ball.speed).abs() < 0.001);
            prop_assert!((ball.speed - speed).abs() < 0.001);
        }
    }

    #[test]
    fn cascades_terminate_and_visit_each_brick_once(
        layout in layout_strategy(),
        row in 0usize..6,
        col in 0usize..10,
    ) {
        let tuning = Tuning::default();
        let mut field = BrickField::from_level(&level(layout), &tuning);
        let before = field.active_count();

        let outcome = field.apply_hit(BrickId::new(row, col), true);
        match &outcome {
            HitOutcome::Destroyed { destroyed, .. } => {
                let unique: HashSet<BrickId> = destroyed.iter().map(|d| d.id).collect();
                prop_assert_eq!(unique.len(), destroyed.len());
                prop_assert_eq!(destroyed[0].id, BrickId::new(row, col));
                prop_assert_eq!(field.active_count(), before - destroyed.len());
            }
            HitOutcome::Miss => prop_assert_eq!(field.active_count(), before),
            HitOutcome::Damaged { .. } => prop_assert!(false, "instant kill never leaves health"),
        }

        // Hitting the same cell again is a no-op
        let after = field.active_count();
        prop_assert!(field.apply_hit(BrickId::new(row, col), false).is_miss());
        prop_assert_eq!(field.active_count(), after);
    }

    #[test]
    fn score_never_decreases(seed in any::<u64>(), targets in prop::collection::vec(0.0f32..800.0, 8)) {
        let mut session = GameSession::with_builtin_levels(seed).unwrap();
        session.start().unwrap();
        let mut last = 0;
        for i in 0..600 {
            let input = TickInput {
                paddle_target_x: Some(targets[i % targets.len()]),
                launch: i % 50 == 0,
            };
            let out = session.step(&input);
            prop_assert!(out.score >= last);
            last = out.score;
        }
    }
}
