//! Built-in question pool.

use serde::{Deserialize, Serialize};

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Stable identifier, also the mistake-book key.
    pub id: u32,
    pub topic: String,
    pub prompt: String,
    pub options: Vec<String>,
    /// Index into `options`.
    pub answer: usize,
    pub explanation: String,
}

fn q(
    id: u32,
    topic: &str,
    prompt: &str,
    options: [&str; 4],
    answer: usize,
    explanation: &str,
) -> Question {
    Question {
        id,
        topic: topic.to_string(),
        prompt: prompt.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        answer,
        explanation: explanation.to_string(),
    }
}

/// The full built-in pool. Rounds draw a random subset of these.
pub fn builtin_pool() -> Vec<Question> {
    vec![
        q(
            1,
            "Batteries",
            "Two 1.5 V batteries in SERIES give a total voltage of?",
            ["1.5 V", "3.0 V", "0 V", "4.5 V"],
            1,
            "Series voltages add: 1.5 + 1.5 = 3.0 V.",
        ),
        q(
            2,
            "Batteries",
            "Two 1.5 V batteries in PARALLEL give a total voltage of?",
            ["1.5 V", "3.0 V", "0.75 V", "4.5 V"],
            0,
            "Parallel batteries keep the single-cell voltage but last longer.",
        ),
        q(
            3,
            "Batteries",
            "Which arrangement empties the batteries fastest?",
            [
                "A single battery",
                "Batteries in series",
                "Batteries in parallel",
                "No bulb connected",
            ],
            1,
            "Series raises the voltage, which raises the current and the energy cost.",
        ),
        q(
            4,
            "Batteries",
            "To double the experiment time without changing brightness, you should wire?",
            [
                "Batteries in series",
                "Batteries in parallel",
                "Bulbs in series",
                "Bulbs in parallel",
            ],
            1,
            "Parallel batteries are a bigger tank: same push, more total energy.",
        ),
        q(
            5,
            "Batteries",
            "Three 1.5 V batteries in series produce?",
            ["1.5 V", "3.0 V", "4.5 V", "6.0 V"],
            2,
            "1.5 V x 3 = 4.5 V.",
        ),
        q(
            6,
            "Batteries",
            "Three 1.5 V batteries in parallel produce?",
            ["4.5 V", "1.5 V", "3.0 V", "0.5 V"],
            1,
            "No matter how many cells sit in parallel, the voltage stays at one cell.",
        ),
        q(
            7,
            "Bulbs",
            "Two identical bulbs in SERIES across a 3 V source: each bulb sees?",
            ["3 V", "1.5 V", "6 V", "0 V"],
            1,
            "Series elements split the voltage evenly when their resistances match.",
        ),
        q(
            8,
            "Bulbs",
            "Two identical bulbs in PARALLEL across a 3 V source: each bulb sees?",
            ["3 V", "1.5 V", "6 V", "0 V"],
            0,
            "Every parallel branch sits across the full source voltage.",
        ),
        q(
            9,
            "Bulbs",
            "Ten bulbs in series and one fails. The others?",
            ["Keep shining", "All go dark", "Get brighter", "Flicker"],
            1,
            "Series is one single path; one break opens the whole loop.",
        ),
        q(
            10,
            "Bulbs",
            "Ten bulbs in parallel and one fails. The others?",
            ["Keep shining", "All go dark", "Get dimmer", "Burn out too"],
            0,
            "Parallel branches are independent of each other.",
        ),
        q(
            11,
            "Bulbs",
            "Which bulb wiring lowers the total resistance?",
            ["Series", "Parallel", "Mixed", "Neither"],
            1,
            "Parallel adds paths for the current, so the total flow gets easier.",
        ),
        q(
            12,
            "Bulbs",
            "Two 30 ohm bulbs in parallel have a combined resistance of?",
            ["60 ohm", "30 ohm", "15 ohm", "0 ohm"],
            2,
            "1/R = 1/30 + 1/30 = 2/30, so R = 15 ohm.",
        ),
        q(
            13,
            "LED",
            "What does LED stand for?",
            [
                "Light-emitting diode",
                "Low-energy device",
                "Laser emission diode",
                "Liquid electric display",
            ],
            0,
            "LED = Light Emitting Diode.",
        ),
        q(
            14,
            "LED",
            "Does an LED have a polarity?",
            [
                "Yes, reversed it stays dark",
                "No, either way works",
                "Only expensive ones",
                "It depends on the color",
            ],
            0,
            "An LED is a diode and conducts in one direction only.",
        ),
        q(
            15,
            "LED",
            "What is the forward voltage (Vf) of an LED?",
            [
                "The voltage that destroys it",
                "The minimum voltage before it lights",
                "The maximum rated voltage",
                "The voltage of an empty battery",
            ],
            1,
            "Below Vf the electrons cannot cross the junction, so no light.",
        ),
        q(
            16,
            "LED",
            "A white LED typically needs a forward voltage of about?",
            ["1.5 V", "3.2 V", "12 V", "0.5 V"],
            1,
            "Blue and white LEDs emit high-energy photons and need 3 V or more.",
        ),
        q(
            17,
            "LED",
            "A red LED's forward voltage compared to a blue LED's is?",
            ["Higher", "Lower", "The same", "Unpredictable"],
            1,
            "Red photons carry less energy, so red LEDs conduct around 1.8 V.",
        ),
        q(
            18,
            "LED",
            "Feeding an LED 6 V with no series resistor will?",
            [
                "Make it extremely bright",
                "Burn it out instantly",
                "Regulate itself",
                "Just change its color",
            ],
            1,
            "Overvoltage drives a huge current that melts the tiny bond wires.",
        ),
        q(
            19,
            "LED",
            "Why are LEDs more efficient than filament bulbs?",
            [
                "They are smaller",
                "They convert more energy into light",
                "Their color is brighter",
                "They do not need a battery",
            ],
            1,
            "LEDs waste very little energy as heat; most of it becomes light.",
        ),
        q(
            20,
            "Energy",
            "In Ohm's law, current and voltage are?",
            [
                "Proportional",
                "Inversely proportional",
                "Unrelated",
                "Related by an inverse square",
            ],
            0,
            "More push (voltage) means more flow (current): I = V / R.",
        ),
        q(
            21,
            "Energy",
            "The watt is the unit of?",
            ["Voltage", "Current", "Power", "Resistance"],
            2,
            "Watts measure how fast energy is being used.",
        ),
        q(
            22,
            "Energy",
            "Doubling the voltage with a transformer makes the battery drain about four times faster because?",
            [
                "Heat is lost in the wires",
                "Voltage and current both double",
                "The battery leaks",
                "The bulb gets hot",
            ],
            1,
            "P = V x I. Doubling V also doubles I, and 2 x 2 = 4.",
        ),
        q(
            23,
            "Energy",
            "Household appliances are normally wired in?",
            ["Series", "Parallel", "An open loop", "A short circuit"],
            1,
            "Parallel wiring gives every appliance the full mains voltage.",
        ),
        q(
            24,
            "Energy",
            "A short circuit means?",
            [
                "The wire is too short",
                "Current bypasses the load and returns directly",
                "The lamp is off",
                "The battery is empty",
            ],
            1,
            "Bypassing the load causes an enormous, dangerous current.",
        ),
        q(
            25,
            "Safety",
            "Touching a socket with wet hands is?",
            [
                "Harmless",
                "Very dangerous",
                "Only risky for sockets, not batteries",
                "Safe because water insulates",
            ],
            1,
            "Moisture drops your body's resistance and lets current through.",
        ),
        q(
            26,
            "Safety",
            "A fuse exists to?",
            [
                "Brighten the lamps",
                "Break the circuit when current is too high",
                "Raise the voltage",
                "Decorate the panel",
            ],
            1,
            "A fuse is a sacrificial safety device that opens on overload.",
        ),
        q(
            27,
            "Safety",
            "You notice a wire getting hot during an experiment. You should?",
            [
                "Add more batteries",
                "Cut the power immediately",
                "Pour water on it",
                "Keep going, it is normal",
            ],
            1,
            "Heat means excessive current, likely a short or an overload.",
        ),
        q(
            28,
            "Components",
            "The job of a switch in a circuit is to?",
            [
                "Raise the voltage",
                "Open or close the current path",
                "Change the bulb color",
                "Store energy",
            ],
            1,
            "A switch makes or breaks the loop.",
        ),
        q(
            29,
            "Components",
            "A voltmeter is connected to the element it measures in?",
            ["Series", "Parallel", "Any orientation", "Place of the switch"],
            1,
            "It measures a voltage difference, so it sits across the element.",
        ),
        q(
            30,
            "Components",
            "An ammeter is connected into the circuit in?",
            ["Series", "Parallel", "Any orientation", "Place of the battery"],
            0,
            "The current being measured has to flow through the meter.",
        ),
        q(
            31,
            "Components",
            "A transformer with a 0.5x ratio?",
            [
                "Halves the voltage",
                "Doubles the voltage",
                "Leaves the voltage unchanged",
                "Burns out",
            ],
            0,
            "Stepping down protects low-voltage parts and saves energy.",
        ),
        q(
            32,
            "Circuits",
            "A complete circuit needs at minimum?",
            [
                "A source, conductors, and a load",
                "Only a source",
                "Only conductors",
                "Only a bulb",
            ],
            0,
            "Without all three there is no closed path for energy to flow.",
        ),
        q(
            33,
            "Circuits",
            "Which of these is a good conductor?",
            ["An eraser", "Copper wire", "Dry wood", "A plastic ruler"],
            1,
            "Metals conduct electrons well; the others are insulators.",
        ),
        q(
            34,
            "Circuits",
            "With the switch open, the current in the loop is?",
            ["At its maximum", "Zero", "Half of normal", "Unlimited"],
            1,
            "An open loop has no complete path, so nothing flows.",
        ),
        q(
            35,
            "Circuits",
            "A battery goes flat because?",
            [
                "It runs out of electrons",
                "Its chemical energy is used up",
                "The wire broke",
                "The weather is hot",
            ],
            1,
            "Batteries generate current from a chemical reaction that depletes.",
        ),
        q(
            36,
            "Circuits",
            "Who built the first battery?",
            ["Edison", "Volta", "Franklin", "Tesla"],
            1,
            "Volta's pile was the first chemical battery, hence the volt.",
        ),
    ]
}
