//! Core plugin: shared resources, global settings and the despawn commit.

use bevy::prelude::*;

use crate::common::cleanup;
use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    app.insert_resource(Tunables::default());
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));

    // Structural removals happen here and nowhere else.
    app.add_systems(PostUpdate, cleanup::despawn_marked);
}
