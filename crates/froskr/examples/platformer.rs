//! Platformer — run, jump, and collect coins.
//!
//! Arrow keys to run, Space to jump. Walls stop you, ceilings bounce you
//! back down, coins disappear when touched. Logs what would be drawn; wire
//! the render hook to a real renderer to see it.

use froskr::prelude::*;

const LEVEL: &[&str] = &[
    "################",
    "#              #",
    "#  o        o  #",
    "#      ##      #",
    "#  o           #",
    "####    o    ###",
    "#      ###     #",
    "#              #",
    "################",
];

#[derive(Default)]
struct PlayerState {
    coins: u32,
}

fn main() {
    env_logger::init();

    Game::new("froskr — platformer")
        .setup(setup)
        .render(draw)
        .run();
}

fn setup(ctx: &mut Context) {
    let wall = ctx.register_type(EntityTypeDef::new('#').bbox(BBox::sized(1.0, 1.0)));
    let coin = ctx.register_type(EntityTypeDef::new('o').bbox(BBox::new(0.2, 0.2, 0.6, 0.6)));

    let player = ctx.register_type(
        EntityTypeDef::new('@')
            .bbox(BBox::new(0.1, 0.0, 0.8, 1.0))
            .state(PlayerState::default)
            .update(move |ctx, e| update_player(ctx, e, wall, coin)),
    );

    ctx.build_map(LEVEL);
    ctx.spawn_at(player, Vec2::new(2.0, 2.0));
}

fn update_player(ctx: &mut Context, e: Entity, wall: EntityTypeId, coin: EntityTypeId) {
    let dt = ctx.time.delta_secs();
    let gravity = ctx.settings.gravity;

    // Gravity is a convention: callbacks apply it, the core never does.
    ctx.world.entity_mut(e).velocity.y += gravity * dt;

    let run = if ctx.input.is_down(KeyCode::ArrowLeft) {
        -6.0
    } else if ctx.input.is_down(KeyCode::ArrowRight) {
        6.0
    } else {
        0.0
    };
    ctx.world.entity_mut(e).velocity.x = run;

    // Grounded means a wall sits one hair's breadth below.
    let on_ground = ctx
        .world
        .find_collision(e, &[wall], Vec2::new(0.0, 0.05))
        .is_some();
    if on_ground && ctx.input.went_down(KeyCode::Space) {
        ctx.world.entity_mut(e).velocity.y = -12.0;
    }

    let contacts = ctx.move_and_resolve(e, &[wall]);
    if contacts.vertical.is_some() && ctx.world.entity(e).velocity.y > 0.0 {
        log::debug!("bounced off a ceiling");
    }

    if let Some(picked) = ctx.world.find_collision(e, &[coin], Vec2::ZERO) {
        ctx.despawn(picked);
        let state = ctx.world.entity_mut(e).state_mut::<PlayerState>().unwrap();
        state.coins += 1;
        log::info!("coin collected ({} total)", state.coins);
    }

    // Camera follows the player.
    let position = ctx.world.entity(e).position;
    ctx.camera.x = position.x;
    ctx.camera.y = position.y;
}

fn draw(ctx: &Context) {
    // Renderer boundary: positions and bboxes, read-only. A real renderer
    // would blit sprites here; this one just reports once a second.
    if ctx.time.total_secs().fract() < ctx.time.delta_secs() {
        log::info!(
            "{} entities, {:.0} fps, camera at ({:.1}, {:.1})",
            ctx.world.entity_count(),
            ctx.time.fps(),
            ctx.camera.x,
            ctx.camera.y,
        );
    }
}
