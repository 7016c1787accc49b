fn main() {
    station_strike::game::run();
}
