//! Sound cues as fire-and-forget messages.
//!
//! Combat systems write cues; nothing in the core ever reads a result back.
//! The drain here logs at debug level and stands where an audio sink would
//! sit. Buffers are double-buffered messages, advanced after the drain.

use bevy::ecs::message::Messages;
use bevy::prelude::*;

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sfx {
    SwordSwing,
    SwordHit,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<Messages<Sfx>>();
    app.add_systems(PostUpdate, (drain_sfx, update_sfx_messages).chain());
}

fn update_sfx_messages(mut msgs: ResMut<Messages<Sfx>>) {
    msgs.update();
}

fn drain_sfx(mut reader: MessageReader<Sfx>) {
    for cue in reader.read() {
        debug!("sfx cue: {cue:?}");
    }
}
