use std::fmt;

/// A symptom/action pair shown to the model as a worked example.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FewShotExample {
    symptom: &'static str,
    action: &'static str,
}

impl FewShotExample {
    pub const fn new(symptom: &'static str, action: &'static str) -> Self {
        Self { symptom, action }
    }

    pub fn symptom(&self) -> &'static str {
        self.symptom
    }

    pub fn action(&self) -> &'static str {
        self.action
    }
}

impl fmt::Display for FewShotExample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "symptom: {}\naction: {}", self.symptom, self.action)
    }
}

/// The fixed example set, in prompt order.
pub const FEW_SHOT_EXAMPLES: [FewShotExample; 5] = [
    FewShotExample::new(
        "Engine is making a knocking noise",
        "The knocking noise could indicate a problem with the engine bearings or low oil levels. \
First, check the oil level. If the oil is low, top it up with the correct grade. If the noise \
persists after adding oil, take the car to a mechanic for further inspection.",
    ),
    FewShotExample::new(
        "Car is pulling to one side while driving",
        "This could be due to uneven tire pressure, misaligned wheels, or brake issues. Start by \
checking the tire pressure on all four tires and ensure they are at the recommended levels. If \
the problem continues, have your wheel alignment checked by a professional. If alignment is \
correct and the issue persists, inspect the brakes.",
    ),
    FewShotExample::new(
        "Brakes are squeaking loudly",
        "Squeaky brakes could be due to worn-out brake pads or moisture on the brake rotors. First, \
inspect the brake pads to see if they need replacing. If the pads are fine, drive the car for a \
short distance to see if the noise goes away as moisture evaporates. If the noise continues, take \
the car to a mechanic to have the brakes inspected.",
    ),
    FewShotExample::new(
        "Car won't start, and there's a clicking noise when you turn the key",
        "This could be a result of a dead battery or a faulty starter motor. First, check the \
battery terminals for corrosion and ensure they are tight. Try jump-starting the car. If the car \
starts, have the battery and alternator tested to ensure they are functioning properly. If the \
car doesn't start after jump-starting, the starter motor might need replacing.",
    ),
    FewShotExample::new(
        "Excessive smoke coming from the exhaust",
        "Excessive smoke could indicate burning oil, a clogged air filter, or engine overheating. \
Start by checking the oil level and top up if necessary. Then, inspect the air filter and replace \
it if it's dirty. Finally, check the coolant level and ensure the radiator fan is working \
properly. If the smoke continues after these checks, take the car to a mechanic for a more \
thorough inspection.",
    ),
];
