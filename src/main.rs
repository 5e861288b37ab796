fn main() {
    grapple_platformer::game::run();
}
