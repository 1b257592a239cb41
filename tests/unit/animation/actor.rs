use super::*;

fn actor() -> Actor {
    Actor::new(Cell::new(0, 0), Vec2::new(320.0, 240.0))
}

#[test]
fn defaults_without_commands() {
    let a = actor();
    assert_eq!(a.position_at(0), Vec2::new(320.0, 240.0));
    assert_eq!(a.scale_at(0), Vec2::new(1.0, 1.0));
    assert_eq!(a.rotation_at(0), 0.0);
    assert_eq!(a.opacity_at(0), 1.0);
    assert_eq!(a.color_at(0), Rgb::WHITE);
}

#[test]
fn before_first_and_after_last_hold_endpoints() {
    let mut a = actor();
    a.push_fade(Ease::Linear, 100, 200, 0.0, 1.0);
    a.push_fade(Ease::Linear, 300, 400, 1.0, 0.25);
    assert_eq!(a.opacity_at(0), 0.0);
    assert_eq!(a.opacity_at(150), 0.5);
    assert_eq!(a.opacity_at(250), 1.0);
    assert_eq!(a.opacity_at(350), 0.625);
    assert_eq!(a.opacity_at(10_000), 0.25);
}

#[test]
fn color_read_back_is_exact_at_end() {
    let mut a = actor();
    let target = Rgb::new(0.8, 0.1, 0.1);
    a.push_color(Ease::OutQuint, 0, 600, Rgb::new(0.3, 0.3, 0.3), target);
    assert_eq!(a.color_at(600), target);
    assert_eq!(a.color_at(601), target);
}

#[test]
fn later_append_wins_on_equal_start() {
    let mut a = actor();
    a.push_rotate(Ease::Linear, 0, 0, 0.0, 1.0);
    a.push_rotate(Ease::Linear, 0, 0, 0.0, 2.0);
    assert_eq!(a.rotation_at(0), 2.0);
}

#[test]
fn append_values_checks_channels() {
    let mut a = actor();
    a.append_values(
        Ease::Linear,
        0,
        10,
        Value::Scale(Vec2::new(1.0, 1.0)),
        Value::Scale(Vec2::new(2.0, 2.0)),
    )
    .unwrap();
    assert_eq!(
        a.value_at(Channel::Scale, 10),
        Value::Scale(Vec2::new(2.0, 2.0))
    );

    let err = a
        .append_values(
            Ease::Linear,
            0,
            10,
            Value::Opacity(1.0),
            Value::Rotation(0.0),
        )
        .unwrap_err();
    assert!(matches!(err, TrigridError::Animation(_)));
}

#[test]
fn loop_group_replays_block() {
    let mut a = actor();
    a.loop_group(1_000, 3, |a| {
        a.push_fade(Ease::Linear, 0, 50, 1.0, 0.0);
        a.push_fade(Ease::Linear, 50, 100, 0.0, 1.0);
        Ok(())
    })
    .unwrap();

    assert_eq!(a.timeline().len(), 1);
    let TimelineItem::Loop(group) = &a.timeline()[0] else {
        panic!("expected a loop group");
    };
    assert_eq!(group.block_duration(), 100);
    assert_eq!(group.end(), 1_300);

    // k = 0, 1, 2 at 1000, 1100, 1200.
    for base in [1_000, 1_100, 1_200] {
        assert_eq!(a.opacity_at(base), 1.0);
        assert_eq!(a.opacity_at(base + 50), 0.0);
        assert_eq!(a.opacity_at(base + 25), 0.5);
    }
    assert_eq!(a.opacity_at(5_000), 1.0);
    assert_eq!(a.flattened().len(), 6);
}

#[test]
fn instant_command_pads_block_duration() {
    let mut a = actor();
    a.loop_group(0, 2, |a| {
        a.push_color(Ease::InBack, 0, 100, Rgb::WHITE, Rgb::BLACK);
        a.push_fade(Ease::Linear, 2_400, 2_400, 1.0, 1.0);
        Ok(())
    })
    .unwrap();
    assert_eq!(a.color_at(2_400), Rgb::WHITE);
    assert_eq!(a.color_at(2_500), Rgb::BLACK);
}

#[test]
fn loop_groups_do_not_nest() {
    let mut a = actor();
    a.start_loop_group(0, 2).unwrap();
    assert!(a.in_loop_group());
    assert!(a.start_loop_group(10, 2).is_err());
    a.end_group().unwrap();
    assert!(a.end_group().is_err());
    assert!(a.start_loop_group(0, 0).is_err());
}

#[test]
fn open_group_is_invisible_to_read_back() {
    let mut a = actor();
    a.start_loop_group(0, 1).unwrap();
    a.push_fade(Ease::Linear, 0, 10, 1.0, 0.0);
    assert_eq!(a.opacity_at(10), 1.0);
    a.end_group().unwrap();
    assert_eq!(a.opacity_at(10), 0.0);
}

#[test]
fn empty_group_leaves_no_item() {
    let mut a = actor();
    a.loop_group(0, 4, |_| Ok(())).unwrap();
    assert!(a.timeline().is_empty());
}
