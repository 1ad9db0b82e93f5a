fn main() {
    shmup_core::game::run();
}
