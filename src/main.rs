use advent_challenges::{solutions, Args, Parser};

fn main() {
    solutions().run(&Args::parse());
}
