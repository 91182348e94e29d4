use genpad::{Button, ControllerVariant, JoystickLine, Level};
use genpad_scenario_harness::ScenarioHarness;

fn booted(variant: ControllerVariant) -> ScenarioHarness {
    let mut harness = ScenarioHarness::new();
    match variant {
        ControllerVariant::SixButton => {}
        ControllerVariant::ThreeButton => harness
            .port()
            .drive_by_select(JoystickLine::AB, Level::High, Level::Low),
        ControllerVariant::AlternateTwoButton => harness
            .port()
            .drive_by_select(JoystickLine::AB, Level::Low, Level::High),
    }
    assert_eq!(harness.boot(), variant);
    harness.port().release(JoystickLine::AB);
    harness.port().clear_events();
    harness
}

#[test]
fn six_button_full_pad_roundtrip() {
    let mut harness = booted(ControllerVariant::SixButton);
    let port = harness.port().clone();

    // Reads in one six-button cycle, per line:
    //   AB:     A (select low), B
    //   StartC: Start (select low), C
    //   Up:     Up, Z    Down: Down, Y    LeftX: Left, X
    port.script(JoystickLine::AB, &[Level::Low, Level::High]);
    port.script(JoystickLine::StartC, &[Level::High, Level::Low]);
    port.script(JoystickLine::Up, &[Level::High, Level::Low]);
    port.script(JoystickLine::Down, &[Level::Low, Level::High]);
    port.script(JoystickLine::LeftX, &[Level::High, Level::High]);
    harness.poll();

    assert_eq!(
        harness.pressed(),
        vec![Button::Down, Button::A, Button::C, Button::Z]
    );
}

#[test]
fn held_inputs_are_stable_across_cycles() {
    let mut harness = booted(ControllerVariant::SixButton);
    harness.port().press(JoystickLine::Right);
    harness
        .port()
        .drive_by_select(JoystickLine::StartC, Level::High, Level::Low);

    harness.run_cycles(1);
    let first = harness.output_levels();
    harness.run_cycles(5);
    assert_eq!(harness.output_levels(), first);
    assert_eq!(harness.pressed(), vec![Button::Right, Button::Start]);
}

#[test]
fn three_button_session_never_touches_start() {
    let mut harness = booted(ControllerVariant::ThreeButton);
    let port = harness.port().clone();

    port.drive_by_select(JoystickLine::StartC, Level::High, Level::Low);
    harness.run_cycles(3);
    assert_eq!(harness.pressed(), vec![Button::Z]);

    port.release(JoystickLine::StartC);
    harness.run_cycles(3);
    harness.assert_all_released("after releasing start");

    assert_eq!(port.writes_to(Button::Start.pin()), 0);
    assert_eq!(port.output_level(Button::Start), Level::High);
}

#[test]
fn legacy_stick_runs_directions_and_fire_only() {
    let mut harness = booted(ControllerVariant::AlternateTwoButton);
    let port = harness.port().clone();

    port.press(JoystickLine::AB);
    port.press(JoystickLine::StartC);
    port.press(JoystickLine::LeftX);
    harness.run_cycles(2);

    assert_eq!(harness.pressed(), vec![Button::Left, Button::A, Button::C]);
    assert!(port.strobe_writes().is_empty());
    assert_eq!(port.strobe_level(), Level::High);
    for button in [Button::B, Button::X, Button::Y, Button::Z, Button::Start] {
        assert_eq!(port.writes_to(button.pin()), 0, "{:?}", button);
    }
}

#[test]
fn main_loop_sleeps_the_poll_period_each_cycle() {
    let mut harness = booted(ControllerVariant::ThreeButton);
    harness.run_cycles(4);
    // 4 select writes x 10us + 8ms per cycle
    assert_eq!(harness.waited_us(), 4 * (4 * 10 + 8_000));
}

/// Every read of one cycle, in order, and the output it drives
fn cycle_reads(variant: ControllerVariant) -> Vec<(JoystickLine, Button)> {
    use Button as B;
    use JoystickLine as L;
    let directions = [
        (L::Up, B::Up),
        (L::Down, B::Down),
        (L::LeftX, B::Left),
        (L::Right, B::Right),
    ];
    match variant {
        ControllerVariant::SixButton => [(L::AB, B::A), (L::StartC, B::Start)]
            .into_iter()
            .chain(directions)
            .chain([
                (L::AB, B::B),
                (L::StartC, B::C),
                (L::LeftX, B::X),
                (L::Down, B::Y),
                (L::Up, B::Z),
            ])
            .collect(),
        ControllerVariant::ThreeButton => [(L::AB, B::A), (L::StartC, B::Z)]
            .into_iter()
            .chain(directions)
            .chain([(L::AB, B::B), (L::StartC, B::C)])
            .collect(),
        ControllerVariant::AlternateTwoButton => directions
            .into_iter()
            .chain([(L::AB, B::A), (L::StartC, B::C)])
            .collect(),
    }
}

#[test]
fn single_poll_truth_table_covers_every_input_pattern() {
    for variant in [
        ControllerVariant::SixButton,
        ControllerVariant::ThreeButton,
        ControllerVariant::AlternateTwoButton,
    ] {
        let mut harness = booted(variant);
        let port = harness.port().clone();
        let reads = cycle_reads(variant);

        for pattern in 0u32..(1 << reads.len()) {
            let mut expected = [Level::High; 11];
            for (i, &(line, button)) in reads.iter().enumerate() {
                let level = if pattern & (1 << i) != 0 {
                    Level::Low
                } else {
                    Level::High
                };
                port.script(line, &[level]);
                let slot = Button::ALL
                    .iter()
                    .position(|&b| b == button)
                    .expect("button is in Button::ALL");
                expected[slot] = level;
            }

            harness.poll();

            assert_eq!(
                harness.output_levels(),
                expected.to_vec(),
                "{} pattern {:#b}",
                variant,
                pattern
            );
            assert_eq!(port.strobe_level(), Level::High, "{} pattern {:#b}", variant, pattern);
            port.clear_events();
        }
    }
}
