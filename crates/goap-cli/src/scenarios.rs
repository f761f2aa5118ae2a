//! Reference domains used by the demo: chopping wood and taking down an enemy.

use clap::ValueEnum;
use goap::{FnAction, FnGoal, GoapAction, GoapPlanner};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Get an axe and chop wood, or gather it by hand
    GatherWood,
    /// Arm, reload, scout and fire, or fall back to a turret or knife
    KillEnemy,
}

impl Scenario {
    pub fn name(self) -> &'static str {
        match self {
            Scenario::GatherWood => "gather-wood",
            Scenario::KillEnemy => "kill-enemy",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Scenario::GatherWood => "collect one piece of wood, starting without an axe",
            Scenario::KillEnemy => "kill a hidden enemy, starting unarmed with one clip",
        }
    }
}

fn action<S: 'static>(
    label: &str,
    cost: f64,
    condition: impl Fn(&S) -> bool + 'static,
    effect: impl Fn(&mut S) + 'static,
) -> Box<dyn GoapAction<S>> {
    Box::new(
        FnAction::new(label, condition, move |mut state: S| {
            effect(&mut state);
            state
        })
        .with_fixed_cost(cost),
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Woodcutter {
    pub is_axe_equipped: bool,
    pub wood: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forest {
    pub is_axe_available: bool,
    pub player: Woodcutter,
}

impl Default for Forest {
    fn default() -> Self {
        Self {
            is_axe_available: true,
            player: Woodcutter {
                is_axe_equipped: false,
                wood: 0,
            },
        }
    }
}

pub fn gather_wood() -> GoapPlanner<Forest> {
    let actions = vec![
        action("chopWood", 2.0, |s: &Forest| s.player.is_axe_equipped, |s| {
            s.player.wood += 1;
        }),
        action(
            "getAxe",
            2.0,
            |s: &Forest| !s.player.is_axe_equipped && s.is_axe_available,
            |s| s.player.is_axe_equipped = true,
        ),
        action("gatherWood", 5.0, |_: &Forest| true, |s| s.player.wood += 1),
    ];
    GoapPlanner::new(
        actions,
        Box::new(FnGoal::new("collectWood", |prev: &Forest, next: &Forest| {
            next.player.wood > prev.player.wood
        })),
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shooter {
    pub weapon_equipped: bool,
    pub bullets: u32,
    pub clips: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub visible: bool,
    pub alive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skirmish {
    pub player: Shooter,
    pub enemy: Target,
}

impl Default for Skirmish {
    fn default() -> Self {
        Self {
            player: Shooter {
                weapon_equipped: false,
                bullets: 0,
                clips: 1,
            },
            enemy: Target {
                visible: false,
                alive: true,
            },
        }
    }
}

pub fn kill_enemy() -> GoapPlanner<Skirmish> {
    let actions = vec![
        action("equipWeapon", 2.0, |s: &Skirmish| !s.player.weapon_equipped, |s| {
            s.player.weapon_equipped = true;
        }),
        action(
            "reloadWeapon",
            2.0,
            |s: &Skirmish| s.player.weapon_equipped && s.player.clips > 0,
            |s| s.player.bullets += 6,
        ),
        action(
            "fireWeapon",
            2.0,
            |s: &Skirmish| s.enemy.visible && s.player.weapon_equipped && s.player.bullets > 0,
            |s| {
                s.player.bullets -= 1;
                s.enemy.alive = false;
            },
        ),
        action("useTurret", 10.0, |s: &Skirmish| s.enemy.visible, |s| {
            s.enemy.alive = false;
        }),
        action("knifeAttack", 12.0, |s: &Skirmish| s.enemy.visible, |s| {
            s.enemy.alive = false;
        }),
        action("scout", 1.0, |s: &Skirmish| !s.enemy.visible, |s| {
            s.enemy.visible = true;
        }),
        action("hide", 1.0, |_: &Skirmish| true, |s| s.enemy.visible = false),
    ];
    GoapPlanner::new(
        actions,
        Box::new(FnGoal::new("killEnemy", |_prev: &Skirmish, next: &Skirmish| {
            !next.enemy.alive
        })),
    )
}
