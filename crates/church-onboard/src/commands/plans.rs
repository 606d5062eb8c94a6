use onboarding_config::OnboardingConfig;

pub(crate) fn run(config: &OnboardingConfig) {
    let mut plans = config.plans().peekable();
    if plans.peek().is_none() {
        println!("No subscription plans configured.");
        return;
    }

    for plan in plans {
        println!("{}  {plan}", plan.id);
        for feature in &plan.features {
            println!("    - {feature}");
        }
    }
}
