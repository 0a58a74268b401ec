use line_follower::simulation::agent::{Action, Agent, Perception, Reading};
use line_follower::simulation::error::SimulationError;
use line_follower::simulation::grid::{Cell, Grid, Position};
use line_follower::simulation::heading::{Heading, Rotation};

fn agent_on(grid: &Grid, x: i32, y: i32, heading: Heading) -> Agent {
    Agent::new(x, y, heading, grid.bounds()).unwrap()
}

#[test]
fn test_agent_initialization() {
    let grid = Grid::new(5, 5).unwrap();
    let agent = agent_on(&grid, 2, 3, Heading::Right);
    assert_eq!(agent.position(), Position::new(2, 3));
    assert_eq!(agent.heading(), Heading::Right);
    assert!(!agent.wall_contact());
}

#[test]
fn test_agent_rejects_outside_start() {
    let grid = Grid::new(5, 5).unwrap();
    let err = Agent::new(5, 0, Heading::Up, grid.bounds()).unwrap_err();
    assert!(matches!(err, SimulationError::InvalidPosition { x: 5, y: 0, .. }));
}

#[test]
fn test_four_rotations_are_identity() {
    let grid = Grid::new(3, 3).unwrap();
    for heading in Heading::ALL {
        for rotation in [Rotation::Clockwise, Rotation::CounterClockwise] {
            let mut agent = agent_on(&grid, 1, 1, heading);
            for _ in 0..4 {
                agent.rotate(rotation);
            }
            assert_eq!(agent.heading(), heading, "{heading} after 4x {rotation:?}");
        }
    }
}

#[test]
fn test_half_turn_is_direction_independent() {
    let grid = Grid::new(3, 3).unwrap();
    for heading in Heading::ALL {
        let mut cw = agent_on(&grid, 1, 1, heading);
        let mut ccw = agent_on(&grid, 1, 1, heading);
        cw.rotate(Rotation::Clockwise);
        cw.rotate(Rotation::Clockwise);
        ccw.rotate(Rotation::CounterClockwise);
        ccw.rotate(Rotation::CounterClockwise);

        assert_eq!(cw.heading(), ccw.heading());
        assert_eq!(cw.heading(), heading.turned(2));
    }
}

#[test]
fn test_move_forward_inside_grid() {
    let grid = Grid::new(3, 3).unwrap();
    let mut agent = agent_on(&grid, 1, 1, Heading::Down);
    agent.move_forward();
    assert_eq!(agent.position(), Position::new(1, 2));
    assert!(!agent.wall_contact());
}

#[test]
fn test_wall_rejection_is_idempotent() {
    let grid = Grid::new(3, 3).unwrap();
    for (x, y, heading) in [
        (1, 0, Heading::Up),
        (2, 1, Heading::Right),
        (1, 2, Heading::Down),
        (0, 1, Heading::Left),
    ] {
        let mut agent = agent_on(&grid, x, y, heading);
        for _ in 0..3 {
            agent.move_forward();
            assert_eq!(agent.position(), Position::new(x, y));
            assert!(agent.wall_contact());
        }
    }
}

#[test]
fn test_successful_move_clears_wall_contact() {
    let grid = Grid::new(3, 3).unwrap();
    let mut agent = agent_on(&grid, 0, 0, Heading::Up);
    agent.move_forward();
    assert!(agent.wall_contact());

    agent.rotate(Rotation::Clockwise);
    agent.move_forward();
    assert_eq!(agent.position(), Position::new(1, 0));
    assert!(!agent.wall_contact());
}

#[test]
fn test_sense_is_relative_to_heading() {
    let mut grid = Grid::new(5, 5).unwrap();
    grid.set(2, 2, Cell::Line).unwrap(); // own
    grid.set(3, 2, Cell::Line).unwrap(); // east of agent

    // Facing up, east is the right sensor
    let agent = agent_on(&grid, 2, 2, Heading::Up);
    let p = agent.sense(&grid);
    assert_eq!(p.own, Reading::Line);
    assert_eq!(p.left, Reading::NoLine);
    assert_eq!(p.center, Reading::NoLine);
    assert_eq!(p.right, Reading::Line);
    assert_eq!(p.heading, Heading::Up);

    // Facing down, east is the left sensor
    let agent = agent_on(&grid, 2, 2, Heading::Down);
    let p = agent.sense(&grid);
    assert_eq!(p.left, Reading::Line);
    assert_eq!(p.right, Reading::NoLine);

    // Facing right, east is straight ahead
    let agent = agent_on(&grid, 2, 2, Heading::Right);
    assert_eq!(agent.sense(&grid).center, Reading::Line);
}

#[test]
fn test_sense_reports_edges() {
    let grid = Grid::new(3, 3).unwrap();
    let agent = agent_on(&grid, 0, 0, Heading::Up);
    let p = agent.sense(&grid);
    assert_eq!(p.own, Reading::NoLine);
    assert_eq!(p.left, Reading::OutOfBounds);
    assert_eq!(p.center, Reading::OutOfBounds);
    assert_eq!(p.right, Reading::NoLine);
}

#[test]
fn test_sense_copies_wall_contact() {
    let grid = Grid::new(3, 3).unwrap();
    let mut agent = agent_on(&grid, 0, 0, Heading::Left);
    assert!(!agent.sense(&grid).wall_contact);
    agent.move_forward();
    assert!(agent.sense(&grid).wall_contact);
    // Sensing does not reset the flag
    assert!(agent.wall_contact());
}

#[test]
fn test_center_line_preempts_left_line() {
    let mut grid = Grid::new(5, 5).unwrap();
    grid.set(2, 1, Cell::Line).unwrap(); // center
    grid.set(1, 2, Cell::Line).unwrap(); // left
    let mut agent = agent_on(&grid, 2, 2, Heading::Up);

    let p = agent.sense(&grid);
    assert_eq!(p.center, Reading::Line);
    assert_eq!(p.left, Reading::Line);
    assert_eq!(agent.decide_and_act(&p), Action::MoveForward);
    assert_eq!(agent.heading(), Heading::Up);
    assert_eq!(agent.position(), Position::new(2, 1));
}

#[test]
fn test_scenario_follow_line_ahead() {
    let mut grid = Grid::new(5, 5).unwrap();
    grid.set(2, 1, Cell::Line).unwrap();
    let mut agent = agent_on(&grid, 2, 2, Heading::Up);

    let p = agent.sense(&grid);
    assert_eq!(agent.decide_and_act(&p), Action::MoveForward);
    assert_eq!(agent.position(), Position::new(2, 1));
    assert!(!agent.wall_contact());
}

#[test]
fn test_scenario_wall_then_turn_around() {
    let grid = Grid::new(3, 3).unwrap();
    let mut agent = agent_on(&grid, 0, 1, Heading::Left);

    // Tick 1: nothing visible, no contact yet, exploratory step hits the wall
    let p = agent.sense(&grid);
    assert_eq!(p.center, Reading::OutOfBounds);
    assert!(!p.wall_contact);
    assert_eq!(agent.decide_and_act(&p), Action::MoveForward);
    assert_eq!(agent.position(), Position::new(0, 1));
    assert!(agent.wall_contact());

    // Tick 2: contact triggers a half turn and a successful step
    let p = agent.sense(&grid);
    assert!(p.wall_contact);
    assert_eq!(agent.decide_and_act(&p), Action::Rotate180);
    assert_eq!(agent.heading(), Heading::Right);
    assert_eq!(agent.position(), Position::new(1, 1));
    assert!(!agent.wall_contact());
}

#[test]
fn test_turn_toward_side_lines() {
    let mut grid = Grid::new(5, 5).unwrap();
    grid.set(1, 2, Cell::Line).unwrap();
    let mut agent = agent_on(&grid, 2, 2, Heading::Up);
    let p = agent.sense(&grid);
    assert_eq!(agent.decide_and_act(&p), Action::RotateLeft);
    assert_eq!(agent.heading(), Heading::Left);
    assert_eq!(agent.position(), Position::new(1, 2));

    let mut grid = Grid::new(5, 5).unwrap();
    grid.set(3, 2, Cell::Line).unwrap();
    let mut agent = agent_on(&grid, 2, 2, Heading::Up);
    let p = agent.sense(&grid);
    assert_eq!(agent.decide_and_act(&p), Action::RotateRight);
    assert_eq!(agent.heading(), Heading::Right);
    assert_eq!(agent.position(), Position::new(3, 2));
}

#[test]
fn test_decision_uses_only_the_perception() {
    let grid = Grid::new(5, 5).unwrap();
    let mut agent = agent_on(&grid, 2, 2, Heading::Up);
    // A hand-built perception overrides what the grid would show
    let p = Perception {
        own: Reading::NoLine,
        left: Reading::NoLine,
        center: Reading::NoLine,
        right: Reading::Line,
        wall_contact: false,
        heading: Heading::Up,
    };
    assert_eq!(agent.decide_and_act(&p), Action::RotateRight);
    assert_eq!(agent.position(), Position::new(3, 2));
}

#[test]
fn test_teleport() {
    let grid = Grid::new(4, 4).unwrap();
    let mut agent = agent_on(&grid, 0, 0, Heading::Up);
    agent.rotate(Rotation::Clockwise);
    agent.move_forward();
    agent.rotate(Rotation::CounterClockwise);
    agent.move_forward();
    assert!(agent.wall_contact());

    agent.teleport(3, 3).unwrap();
    assert_eq!(agent.position(), Position::new(3, 3));
    assert_eq!(agent.heading(), Heading::Up);
    assert!(!agent.wall_contact());

    let before = agent.clone();
    let err = agent.teleport(4, 0).unwrap_err();
    assert!(matches!(err, SimulationError::InvalidPosition { x: 4, y: 0, .. }));
    assert_eq!(agent, before);
}
