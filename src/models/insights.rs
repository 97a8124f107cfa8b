//! Headline figures and chart series shown on the dashboard and in reports.
//!
//! None of these are computed. They are fixed placeholders for the "AI
//! prediction" and "genetic algorithm" panels; no model or optimiser runs.

pub const MOCK_ACCURACY_PERCENT: f64 = 94.5;
pub const MOCK_GA_GENERATIONS: u32 = 1_247;
pub const MOCK_YIELD_IMPROVEMENT_PERCENT: f64 = 23.4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldPoint {
    pub month: &'static str,
    pub predicted: u64,
    pub actual: u64,
    pub optimized: u64,
}

impl YieldPoint {
    const fn new(month: &'static str, predicted: u64, actual: u64, optimized: u64) -> Self {
        Self {
            month,
            predicted,
            actual,
            optimized,
        }
    }
}

pub const YIELD_PREDICTION_SERIES: &[YieldPoint] = &[
    YieldPoint::new("Jan", 45, 42, 48),
    YieldPoint::new("Feb", 52, 50, 56),
    YieldPoint::new("Mar", 61, 59, 65),
    YieldPoint::new("Apr", 70, 68, 75),
    YieldPoint::new("May", 78, 75, 82),
    YieldPoint::new("Jun", 85, 82, 89),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvolutionPoint {
    pub generation: &'static str,
    pub fitness: u64,
    pub diversity: u64,
}

impl EvolutionPoint {
    const fn new(generation: &'static str, fitness: u64, diversity: u64) -> Self {
        Self {
            generation,
            fitness,
            diversity,
        }
    }
}

pub const GA_EVOLUTION_SERIES: &[EvolutionPoint] = &[
    EvolutionPoint::new("Gen 1", 65, 85),
    EvolutionPoint::new("Gen 50", 72, 75),
    EvolutionPoint::new("Gen 100", 81, 68),
    EvolutionPoint::new("Gen 200", 88, 55),
    EvolutionPoint::new("Gen 500", 93, 42),
    EvolutionPoint::new("Gen 1000", 96, 35),
];

/// `1247` -> `"1,247"`
pub fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// A named group of labelled values, the shape every chart renderer consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub title: &'static str,
    pub description: &'static str,
    pub legend: Vec<&'static str>,
    /// (label, one value per legend entry)
    pub groups: Vec<(&'static str, Vec<u64>)>,
}

impl ChartSeries {
    pub fn yield_prediction() -> Self {
        Self {
            title: "Yield Prediction Analysis",
            description: "AI predictions vs actual yield with genetic optimization",
            legend: vec!["AI Predicted", "Actual Yield", "GA Optimized"],
            groups: YIELD_PREDICTION_SERIES
                .iter()
                .map(|p| (p.month, vec![p.predicted, p.actual, p.optimized]))
                .collect(),
        }
    }

    pub fn ga_evolution() -> Self {
        Self {
            title: "Genetic Algorithm Evolution",
            description: "Fitness progression and population diversity over generations",
            legend: vec!["Fitness Score", "Population Diversity"],
            groups: GA_EVOLUTION_SERIES
                .iter()
                .map(|p| (p.generation, vec![p.fitness, p.diversity]))
                .collect(),
        }
    }

    pub fn max_value(&self) -> Option<u64> {
        self.groups
            .iter()
            .flat_map(|(_, v)| v.iter().copied())
            .max()
    }
}
